// ==========================================
// 森林防火资源调度系统 - 资源需求模型
// ==========================================
// 红线: quantity 为无符号整数,负数量在类型层面不可表达
// 红线: quantity == 0 表示该类型无需求,分配时必须跳过
// ==========================================

use crate::domain::types::{Priority, ResourceType};
use serde::{Deserialize, Serialize};

// ==========================================
// ResourceRequirement - 单类型资源需求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRequirement {
    pub resource_type: ResourceType,
    pub quantity: u32,
    pub priority: Priority,
    /// 需求判定原因 (JSON 格式,可解释性)
    pub reason: String,
}

// ==========================================
// RequirementTable - 区域需求表
// ==========================================
// 按 ResourceType::ALL 的固定顺序排列,保证确定性
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementTable {
    pub requirements: Vec<ResourceRequirement>,
}

impl RequirementTable {
    /// 空需求表（低风险区域）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 是否无任何有效需求
    pub fn is_empty(&self) -> bool {
        self.requirements.iter().all(|r| r.quantity == 0)
    }

    /// 遍历数量大于零的需求
    pub fn demanded(&self) -> impl Iterator<Item = &ResourceRequirement> {
        self.requirements.iter().filter(|r| r.quantity > 0)
    }

    /// 按类型查找需求
    pub fn get(&self, resource_type: ResourceType) -> Option<&ResourceRequirement> {
        self.requirements
            .iter()
            .find(|r| r.resource_type == resource_type)
    }
}

// ==========================================
// FulfillmentRecord - 需求满足度记录
// ==========================================
// 用途: 资源不足时静默部分满足,通过本记录观测缺口
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentRecord {
    pub region_id: String,
    pub resource_type: ResourceType,
    pub priority: Priority,
    pub requested: u32,
    pub fulfilled: u32,
}

impl FulfillmentRecord {
    /// 未满足的数量
    pub fn shortfall(&self) -> u32 {
        self.requested.saturating_sub(self.fulfilled)
    }
}

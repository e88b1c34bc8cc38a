// ==========================================
// 森林防火资源调度系统 - 应急资源领域模型
// ==========================================
// 红线: 资源记录由资源台账独占持有
// 红线: status/location 仅通过显式状态更新操作变更
// ==========================================

use crate::domain::geo::GeoPoint;
use crate::domain::types::{ResourceStatus, ResourceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Resource - 应急资源
// ==========================================
// capacity 的单位随类型变化:
// - 扑火队: 人数
// - 水罐车: 载水量(升)
// - 无人机: 续航(小时)
// - 直升机: 吊桶容量(升)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    // ===== 主键 =====
    pub resource_id: String,

    // ===== 固有属性 =====
    pub resource_type: ResourceType,
    pub capacity: f64,
    pub base_response_time_minutes: i64, // 出发前固定响应耗时
    pub operational_cost_per_hour: f64,  // 运行成本(每小时)
    pub effectiveness_rating: f64,       // 效能评级 [0,1]

    // ===== 可变字段 =====
    pub location: GeoPoint,
    pub status: ResourceStatus,

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// 是否处于可调度状态
    pub fn is_available(&self) -> bool {
        self.status == ResourceStatus::Available
    }
}

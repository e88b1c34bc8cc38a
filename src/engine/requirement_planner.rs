// ==========================================
// 森林防火资源调度系统 - 需求规划引擎
// ==========================================
// 职责: 将区域风险画像映射为资源需求表
// 输入: 区域风险画像
// 输出: 资源类型 -> (数量, 优先级) 需求表
// 红线: 所有需求必须输出 reason
// ==========================================

use crate::domain::region::RegionRiskDescriptor;
use crate::domain::requirement::{RequirementTable, ResourceRequirement};
use crate::domain::types::{
    Accessibility, Priority, ResourceType, TerrainDifficulty, VegetationDensity,
};
use serde_json::json;

/// 低于该分值的区域无需任何响应
pub const MIN_RESPONSE_RISK_SCORE: f64 = 0.3;

// ==========================================
// RequirementPlanner - 需求规划引擎
// ==========================================
pub struct RequirementPlanner {
    // 无状态引擎,不需要注入依赖
}

impl RequirementPlanner {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 生成区域需求表
    ///
    /// 规则:
    /// 1) risk_score < 0.3 -> 空表（无需响应,不是错误）
    /// 2) 基础阈值表按 risk_score 单调递增:
    ///    - ≥0.8: 扑火队3(紧急) 水罐车2(紧急) 无人机2(高) 直升机1(高)
    ///    - ≥0.6: 扑火队2(高) 水罐车1(高) 无人机1(中)
    ///    - ≥0.4: 扑火队1(中) 无人机1(中)
    ///    - 其余(0.3~0.4): 全零
    /// 3) 修正项（基础表之后叠加）:
    ///    - 地形险峻 或 可达性差 -> 直升机数量+1,优先级抬升一级（紧急封顶）
    ///    - 植被茂密 -> 水罐车数量+1（优先级不变）
    ///
    /// # 参数
    /// - `region`: 区域风险画像
    ///
    /// # 返回
    /// 需求表（数量为 0 的条目表示该类型无需求）
    pub fn plan(&self, region: &RegionRiskDescriptor) -> RequirementTable {
        if region.risk_score < MIN_RESPONSE_RISK_SCORE {
            return RequirementTable::empty();
        }

        let risk_score = region.risk_score;

        // ===== 基础阈值表 =====
        let (crew, mut tank, drone, mut helicopter) = if risk_score >= 0.8 {
            (
                (3u32, Priority::Critical),
                (2u32, Priority::Critical),
                (2u32, Priority::High),
                (1u32, Priority::High),
            )
        } else if risk_score >= 0.6 {
            (
                (2, Priority::High),
                (1, Priority::High),
                (1, Priority::Medium),
                (0, Priority::Low),
            )
        } else if risk_score >= 0.4 {
            (
                (1, Priority::Medium),
                (0, Priority::Medium),
                (1, Priority::Medium),
                (0, Priority::Low),
            )
        } else {
            (
                (0, Priority::Medium),
                (0, Priority::Medium),
                (0, Priority::Low),
                (0, Priority::Low),
            )
        };

        // ===== 修正项 =====
        let mut modifiers: Vec<&str> = Vec::new();

        let hard_to_reach = region.terrain_difficulty == TerrainDifficulty::Difficult
            || region.accessibility == Accessibility::Low;
        if hard_to_reach {
            helicopter.0 += 1;
            helicopter.1 = helicopter.1.elevate();
            modifiers.push("HARD_TO_REACH");
        }

        if region.vegetation_density == VegetationDensity::Dense {
            tank.0 += 1;
            modifiers.push("DENSE_VEGETATION");
        }

        let risk_level = region.risk_level();
        let build_reason = |resource_type: ResourceType, quantity: u32| {
            json!({
                "region_id": region.region_id,
                "risk_score": risk_score,
                "risk_level": risk_level.to_db_str(),
                "resource_type": resource_type.to_db_str(),
                "quantity": quantity,
                "modifiers": modifiers,
            })
            .to_string()
        };

        RequirementTable {
            requirements: vec![
                ResourceRequirement {
                    resource_type: ResourceType::FirefighterCrew,
                    quantity: crew.0,
                    priority: crew.1,
                    reason: build_reason(ResourceType::FirefighterCrew, crew.0),
                },
                ResourceRequirement {
                    resource_type: ResourceType::WaterTank,
                    quantity: tank.0,
                    priority: tank.1,
                    reason: build_reason(ResourceType::WaterTank, tank.0),
                },
                ResourceRequirement {
                    resource_type: ResourceType::Drone,
                    quantity: drone.0,
                    priority: drone.1,
                    reason: build_reason(ResourceType::Drone, drone.0),
                },
                ResourceRequirement {
                    resource_type: ResourceType::Helicopter,
                    quantity: helicopter.0,
                    priority: helicopter.1,
                    reason: build_reason(ResourceType::Helicopter, helicopter.0),
                },
            ],
        }
    }
}

impl Default for RequirementPlanner {
    fn default() -> Self {
        Self::new()
    }
}

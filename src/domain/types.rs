// ==========================================
// 森林防火资源调度系统 - 领域类型定义
// ==========================================
// 红线: 优先级是等级制,不是评分制
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 资源类型 (Resource Type)
// ==========================================
// 四类应急资源,速度与调度语义各不相同
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    FirefighterCrew, // 扑火队
    WaterTank,       // 水罐车
    Drone,           // 无人机
    Helicopter,      // 直升机
}

impl ResourceType {
    /// 全部资源类型（固定遍历顺序,保证输出确定性）
    pub const ALL: [ResourceType; 4] = [
        ResourceType::FirefighterCrew,
        ResourceType::WaterTank,
        ResourceType::Drone,
        ResourceType::Helicopter,
    ];

    /// 行进速度 (km/h)
    ///
    /// 扑火队/水罐车按公路速度,无人机/直升机按直线飞行速度
    pub fn speed_kmh(&self) -> f64 {
        match self {
            ResourceType::FirefighterCrew => 60.0,
            ResourceType::WaterTank => 50.0,
            ResourceType::Drone => 80.0,
            ResourceType::Helicopter => 150.0,
        }
    }

    /// 中文显示名称（用于推荐理由文案）
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceType::FirefighterCrew => "扑火队",
            ResourceType::WaterTank => "水罐车",
            ResourceType::Drone => "侦察无人机",
            ResourceType::Helicopter => "消防直升机",
        }
    }

    /// 从字符串解析资源类型
    ///
    /// # 返回
    /// - `Some(ResourceType)`: 合法类型
    /// - `None`: 未知类型（调用方必须显式失败,不得静默回退）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "FIREFIGHTER_CREW" => Some(ResourceType::FirefighterCrew),
            "WATER_TANK" => Some(ResourceType::WaterTank),
            "DRONE" => Some(ResourceType::Drone),
            "HELICOPTER" => Some(ResourceType::Helicopter),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ResourceType::FirefighterCrew => "FIREFIGHTER_CREW",
            ResourceType::WaterTank => "WATER_TANK",
            ResourceType::Drone => "DRONE",
            ResourceType::Helicopter => "HELICOPTER",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 资源状态 (Resource Status)
// ==========================================
// 状态仅通过显式的状态更新操作变更
// 红线: 优化计算不修改资源状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceStatus {
    Available,   // 可调度
    Deployed,    // 已部署
    Maintenance, // 维护中
}

impl ResourceStatus {
    /// 从字符串解析资源状态
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "AVAILABLE" => Some(ResourceStatus::Available),
            "DEPLOYED" => Some(ResourceStatus::Deployed),
            "MAINTENANCE" => Some(ResourceStatus::Maintenance),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ResourceStatus::Available => "AVAILABLE",
            ResourceStatus::Deployed => "DEPLOYED",
            ResourceStatus::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 调度优先级 (Dispatch Priority)
// ==========================================
// 总序: Critical > High > Medium > Low
// 声明顺序即排序顺序（Critical 排最前）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Critical, // 紧急
    High,     // 高
    Medium,   // 中
    Low,      // 低
}

impl Priority {
    /// 数值等级（1 最紧急,用于全局排序键）
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
        }
    }

    /// 抬升一级（Critical 封顶,不报错）
    pub fn elevate(&self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Critical,
            Priority::Critical => Priority::Critical,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Priority::Critical => "CRITICAL",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 火险等级 (Risk Level)
// ==========================================
// 由 risk_score 派生,顺序: Low < Moderate < High < VeryHigh
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,      // 低风险
    Moderate, // 中风险
    High,     // 高风险
    VeryHigh, // 极高风险
}

impl RiskLevel {
    /// 按风险分值划分等级
    ///
    /// 阈值: ≥0.8 极高 / ≥0.6 高 / ≥0.4 中 / 其余 低
    pub fn from_score(risk_score: f64) -> Self {
        if risk_score >= 0.8 {
            RiskLevel::VeryHigh
        } else if risk_score >= 0.6 {
            RiskLevel::High
        } else if risk_score >= 0.4 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// 建议部署时长（小时）
    pub fn recommended_duration_hours(&self) -> f64 {
        match self {
            RiskLevel::VeryHigh => 8.0,
            RiskLevel::High => 6.0,
            RiskLevel::Moderate => 4.0,
            RiskLevel::Low => 2.0,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::VeryHigh => "VERY_HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 地形难度 (Terrain Difficulty)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerrainDifficulty {
    Easy,      // 平缓
    Moderate,  // 一般
    Difficult, // 险峻
}

impl fmt::Display for TerrainDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainDifficulty::Easy => write!(f, "EASY"),
            TerrainDifficulty::Moderate => write!(f, "MODERATE"),
            TerrainDifficulty::Difficult => write!(f, "DIFFICULT"),
        }
    }
}

// ==========================================
// 植被密度 (Vegetation Density)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VegetationDensity {
    Sparse,   // 稀疏
    Moderate, // 一般
    Dense,    // 茂密
}

impl fmt::Display for VegetationDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VegetationDensity::Sparse => write!(f, "SPARSE"),
            VegetationDensity::Moderate => write!(f, "MODERATE"),
            VegetationDensity::Dense => write!(f, "DENSE"),
        }
    }
}

// ==========================================
// 可达性 (Accessibility)
// ==========================================
// 描述地面力量进入区域的难易程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Accessibility {
    High,   // 畅通
    Medium, // 一般
    Low,    // 困难
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessibility::High => write!(f, "HIGH"),
            Accessibility::Medium => write!(f, "MEDIUM"),
            Accessibility::Low => write!(f, "LOW"),
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_order() {
        assert_eq!(Priority::Critical.rank(), 1);
        assert_eq!(Priority::High.rank(), 2);
        assert_eq!(Priority::Medium.rank(), 3);
        assert_eq!(Priority::Low.rank(), 4);

        // 声明顺序与 rank 一致,Critical 排最前
        assert!(Priority::Critical < Priority::High);
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn test_priority_elevate_saturates() {
        assert_eq!(Priority::Low.elevate(), Priority::Medium);
        assert_eq!(Priority::Medium.elevate(), Priority::High);
        assert_eq!(Priority::High.elevate(), Priority::Critical);
        // Critical 封顶,不报错
        assert_eq!(Priority::Critical.elevate(), Priority::Critical);
    }

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0.85), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::from_score(0.8), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::from_score(0.79), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.59), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(0.4), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(0.39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    }

    #[test]
    fn test_risk_level_duration() {
        assert_eq!(RiskLevel::VeryHigh.recommended_duration_hours(), 8.0);
        assert_eq!(RiskLevel::High.recommended_duration_hours(), 6.0);
        assert_eq!(RiskLevel::Moderate.recommended_duration_hours(), 4.0);
        assert_eq!(RiskLevel::Low.recommended_duration_hours(), 2.0);
    }

    #[test]
    fn test_resource_type_round_trip() {
        for rt in ResourceType::ALL {
            assert_eq!(ResourceType::from_str(rt.to_db_str()), Some(rt));
        }
        // 未知类型必须返回 None,不得静默回退
        assert_eq!(ResourceType::from_str("BULLDOZER"), None);
    }

    #[test]
    fn test_resource_status_round_trip() {
        for st in [
            ResourceStatus::Available,
            ResourceStatus::Deployed,
            ResourceStatus::Maintenance,
        ] {
            assert_eq!(ResourceStatus::from_str(st.to_db_str()), Some(st));
        }
        assert_eq!(ResourceStatus::from_str("RETIRED"), None);
    }

    #[test]
    fn test_speed_table() {
        assert_eq!(ResourceType::FirefighterCrew.speed_kmh(), 60.0);
        assert_eq!(ResourceType::WaterTank.speed_kmh(), 50.0);
        assert_eq!(ResourceType::Drone.speed_kmh(), 80.0);
        assert_eq!(ResourceType::Helicopter.speed_kmh(), 150.0);
    }
}

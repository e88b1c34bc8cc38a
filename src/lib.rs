// ==========================================
// 森林防火资源调度系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (推荐不等于执行,人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    Accessibility, Priority, ResourceStatus, ResourceType, RiskLevel, TerrainDifficulty,
    VegetationDensity,
};

// 领域实体
pub use domain::{
    CatalogSummary, DispatchRunRecord, FulfillmentRecord, GeoPoint, OptimizationReport,
    Recommendation, RegionRiskDescriptor, RequirementTable, Resource, ResourceRequirement,
    TypeSummary,
};

// 引擎
pub use engine::{
    DispatchOrchestrator, DispatchOutcome, RecommendationRanker, RequirementPlanner,
    ResourceAllocator, ScoringWeights, SuitabilityScorer, TravelEstimator,
};

// API
pub use api::{ApiError, ApiResult, DispatchApi};

// 配置
pub use config::{ConfigManager, DispatchConfig, DispatchConfigReader, StaticDispatchConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "森林防火应急资源调度系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

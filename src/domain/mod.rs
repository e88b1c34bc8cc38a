// ==========================================
// 森林防火资源调度系统 - 领域层
// ==========================================
// 职责: 实体与类型定义,不含业务规则与数据访问
// ==========================================

pub mod geo;
pub mod recommendation;
pub mod region;
pub mod requirement;
pub mod resource;
pub mod run_log;
pub mod types;

// 重导出常用类型
pub use geo::GeoPoint;
pub use recommendation::{CatalogSummary, OptimizationReport, Recommendation, TypeSummary};
pub use region::RegionRiskDescriptor;
pub use requirement::{FulfillmentRecord, RequirementTable, ResourceRequirement};
pub use resource::Resource;
pub use run_log::DispatchRunRecord;
pub use types::{
    Accessibility, Priority, ResourceStatus, ResourceType, RiskLevel, TerrainDifficulty,
    VegetationDensity,
};

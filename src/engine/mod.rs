// ==========================================
// 森林防火资源调度系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,不拼 SQL
// 红线: Engine 不拼 SQL, 所有规则必须输出 reason
// 红线: 引擎是输入的确定性纯函数,无随机性
// ==========================================

pub mod allocator;
pub mod estimator;
pub mod events;
pub mod orchestrator;
pub mod ranker;
pub mod requirement_planner;
pub mod suitability;

// 重导出核心引擎
pub use allocator::ResourceAllocator;
pub use estimator::TravelEstimator;
pub use events::{
    DispatchEvent, DispatchEventPublisher, DispatchEventType, NoOpEventPublisher,
    OptionalEventPublisher,
};
pub use orchestrator::{DispatchOrchestrator, DispatchOutcome};
pub use ranker::{RecommendationRanker, DEFAULT_MAX_RECOMMENDATIONS};
pub use requirement_planner::{RequirementPlanner, MIN_RESPONSE_RISK_SCORE};
pub use suitability::{ScoringWeights, SuitabilityScore, SuitabilityScorer};

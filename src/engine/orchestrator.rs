// ==========================================
// 森林防火资源调度系统 - 调度编排器
// ==========================================
// 用途: 协调需求规划/资源分配/排序汇总的执行顺序
// 红线: 整条流水线是输入的确定性纯函数,不触碰台账
// ==========================================

use crate::config::DispatchConfig;
use crate::domain::recommendation::{CatalogSummary, Recommendation};
use crate::domain::region::RegionRiskDescriptor;
use crate::domain::requirement::FulfillmentRecord;
use crate::domain::resource::Resource;
use crate::engine::allocator::ResourceAllocator;
use crate::engine::ranker::RecommendationRanker;
use crate::engine::requirement_planner::RequirementPlanner;
use crate::engine::suitability::SuitabilityScorer;
use std::collections::HashSet;
use tracing::{debug, info};

// ==========================================
// DispatchOutcome - 优化计算结果
// ==========================================
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// 排序并截断后的推荐列表
    pub recommendations: Vec<Recommendation>,
    /// 返回列表的成本合计
    pub total_cost: f64,
    /// 台账快照汇总
    pub catalog_summary: CatalogSummary,
    /// 各区域各类型的满足度记录
    pub fulfillment: Vec<FulfillmentRecord>,
}

// ==========================================
// DispatchOrchestrator - 调度编排器
// ==========================================
pub struct DispatchOrchestrator {
    planner: RequirementPlanner,
    allocator: ResourceAllocator,
    ranker: RecommendationRanker,
}

impl DispatchOrchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - `config`: 调度配置（评分权重 + 推荐数量上限,调用方已校验）
    pub fn new(config: &DispatchConfig) -> Self {
        Self {
            planner: RequirementPlanner::new(),
            allocator: ResourceAllocator::new(SuitabilityScorer::new(config.weights)),
            ranker: RecommendationRanker::new(config.max_recommendations),
        }
    }

    /// 执行完整优化流程（单次调用）
    ///
    /// 输入已由调用方校验;台账快照在调用前一次性读取,
    /// 流程中不再访问存储
    ///
    /// # 参数
    /// - `regions`: 区域风险画像列表
    /// - `snapshot`: 台账一致性快照
    ///
    /// # 返回
    /// 优化结果（推荐、成本合计、台账汇总、满足度记录）
    pub fn optimize(
        &self,
        regions: &[RegionRiskDescriptor],
        snapshot: &[Resource],
    ) -> DispatchOutcome {
        info!(
            region_count = regions.len(),
            snapshot_size = snapshot.len(),
            "开始执行资源调度优化"
        );

        // ==========================================
        // 步骤1: 需求规划 + 资源分配（逐区域）
        // ==========================================
        // 预留集合跨区域共享,保证全局互斥
        let mut reserved: HashSet<String> = HashSet::new();
        let mut all_recommendations = Vec::new();
        let mut all_fulfillment = Vec::new();

        for region in regions {
            let table = self.planner.plan(region);
            if table.is_empty() {
                debug!(
                    region_id = %region.region_id,
                    risk_score = region.risk_score,
                    "区域无资源需求,跳过"
                );
                continue;
            }

            let (recommendations, fulfillment) =
                self.allocator
                    .allocate_for_region(region, &table, snapshot, &mut reserved);

            debug!(
                region_id = %region.region_id,
                recommendation_count = recommendations.len(),
                "区域分配完成"
            );

            all_recommendations.extend(recommendations);
            all_fulfillment.extend(fulfillment);
        }

        info!(
            candidate_recommendations = all_recommendations.len(),
            reserved_resources = reserved.len(),
            "需求规划与资源分配完成"
        );

        // ==========================================
        // 步骤2: 全局排序与截断
        // ==========================================
        let recommendations = self.ranker.rank(all_recommendations);

        // ==========================================
        // 步骤3: 汇总
        // ==========================================
        let total_cost = RecommendationRanker::total_cost(&recommendations);
        let catalog_summary = RecommendationRanker::summarize_catalog(snapshot);

        info!(
            final_recommendations = recommendations.len(),
            total_cost,
            "资源调度优化完成"
        );

        DispatchOutcome {
            recommendations,
            total_cost,
            catalog_summary,
            fulfillment: all_fulfillment,
        }
    }
}

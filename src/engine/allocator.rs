// ==========================================
// 森林防火资源调度系统 - 资源分配引擎
// ==========================================
// 红线: 单次优化内同一资源至多被推荐一次（全局互斥）
// 红线: 分配只做本次调用内的预留,绝不修改台账状态
// ==========================================
// 职责: 按需求表从台账快照中挑选最适配资源
// 输入: 区域画像 + 需求表 + 台账快照 + 本次已预留集合
// 输出: 调度推荐列表 + 需求满足度记录
// ==========================================

use crate::domain::recommendation::Recommendation;
use crate::domain::region::RegionRiskDescriptor;
use crate::domain::requirement::{FulfillmentRecord, RequirementTable};
use crate::domain::resource::Resource;
use crate::domain::types::{Priority, RiskLevel};
use crate::engine::estimator::TravelEstimator;
use crate::engine::suitability::{SuitabilityScorer, MAX_EFFECTIVE_DISTANCE_KM};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

// ==========================================
// ResourceAllocator - 资源分配引擎
// ==========================================
pub struct ResourceAllocator {
    estimator: TravelEstimator,
    scorer: SuitabilityScorer,
}

/// 候选资源及其评估值
struct ScoredCandidate<'a> {
    resource: &'a Resource,
    suitability: f64,
    distance_km: f64,
    travel_time_minutes: i64,
}

impl ResourceAllocator {
    /// 构造函数
    ///
    /// # 参数
    /// - `scorer`: 适配度评分引擎（携带权重配置）
    pub fn new(scorer: SuitabilityScorer) -> Self {
        Self {
            estimator: TravelEstimator::new(),
            scorer,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 为单个区域分配资源
    ///
    /// 规则:
    /// 1) 逐条处理数量大于零的需求
    /// 2) 候选 = 快照中该类型的可调度资源,剔除本次已预留者
    /// 3) 按适配度降序排序,同分按 resource_id 升序（确定性）
    /// 4) 取前 quantity 个,逐个登记到预留集合
    /// 5) 候选不足时静默部分满足,缺口体现在满足度记录中
    ///
    /// # 参数
    /// - `region`: 区域风险画像
    /// - `table`: 该区域的需求表
    /// - `snapshot`: 台账快照
    /// - `reserved`: 本次优化已预留的 resource_id 集合（跨区域共享）
    ///
    /// # 返回
    /// (推荐列表, 满足度记录列表)
    pub fn allocate_for_region(
        &self,
        region: &RegionRiskDescriptor,
        table: &RequirementTable,
        snapshot: &[Resource],
        reserved: &mut HashSet<String>,
    ) -> (Vec<Recommendation>, Vec<FulfillmentRecord>) {
        let mut recommendations = Vec::new();
        let mut fulfillment = Vec::new();

        for requirement in table.demanded() {
            let mut candidates: Vec<ScoredCandidate<'_>> = snapshot
                .iter()
                .filter(|r| {
                    r.resource_type == requirement.resource_type
                        && r.is_available()
                        && !reserved.contains(&r.resource_id)
                })
                .map(|r| {
                    let distance_km = self.estimator.distance_km(&r.location, &region.coordinates);
                    let travel_time_minutes = self.estimator.travel_time_minutes(r, distance_km);
                    let suitability = self.scorer.score(r, distance_km, travel_time_minutes).total;
                    ScoredCandidate {
                        resource: r,
                        suitability,
                        distance_km,
                        travel_time_minutes,
                    }
                })
                .collect();

            // 适配度降序,同分按 resource_id 升序
            candidates.sort_by(|a, b| {
                b.suitability
                    .partial_cmp(&a.suitability)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.resource.resource_id.cmp(&b.resource.resource_id))
            });

            let mut fulfilled = 0u32;
            for candidate in candidates.into_iter().take(requirement.quantity as usize) {
                reserved.insert(candidate.resource.resource_id.clone());
                recommendations.push(self.build_recommendation(region, requirement.priority, &candidate));
                fulfilled += 1;
            }

            if fulfilled < requirement.quantity {
                debug!(
                    region_id = %region.region_id,
                    resource_type = %requirement.resource_type,
                    requested = requirement.quantity,
                    fulfilled,
                    "可调度资源不足,部分满足"
                );
            }

            fulfillment.push(FulfillmentRecord {
                region_id: region.region_id.clone(),
                resource_type: requirement.resource_type,
                priority: requirement.priority,
                requested: requirement.quantity,
                fulfilled,
            });
        }

        (recommendations, fulfillment)
    }

    // ==========================================
    // 推荐构造
    // ==========================================

    /// 由候选评估值构造一条部署推荐
    fn build_recommendation(
        &self,
        region: &RegionRiskDescriptor,
        priority: Priority,
        candidate: &ScoredCandidate<'_>,
    ) -> Recommendation {
        let resource = candidate.resource;
        let risk_level = region.risk_level();
        let duration_hours = risk_level.recommended_duration_hours();
        let cost_estimate = resource.operational_cost_per_hour * duration_hours;

        // 综合效果评分: 效能 40% + 距离因子 30% + 风险紧迫度 30%
        let distance_factor = (1.0 - candidate.distance_km / MAX_EFFECTIVE_DISTANCE_KM).max(0.0);
        let effectiveness_score = resource.effectiveness_rating * 0.4
            + distance_factor * 0.3
            + region.risk_score * 0.3;

        let justification = self.build_justification(region, resource, candidate.travel_time_minutes);

        Recommendation {
            resource_id: resource.resource_id.clone(),
            resource_type: resource.resource_type,
            priority,
            region_id: region.region_id.clone(),
            deployment_location: region.coordinates,
            estimated_arrival_minutes: candidate.travel_time_minutes,
            recommended_duration_hours: duration_hours,
            cost_estimate,
            effectiveness_score,
            justification,
        }
    }

    /// 按火险等级生成人读理由文案
    fn build_justification(
        &self,
        region: &RegionRiskDescriptor,
        resource: &Resource,
        arrival_minutes: i64,
    ) -> String {
        let type_name = resource.resource_type.display_name();
        match region.risk_level() {
            RiskLevel::VeryHigh => format!(
                "{}区域火险极高({:.1}%),需要立即部署。{}预计{}分钟抵达。",
                region.region_id,
                region.risk_score * 100.0,
                type_name,
                arrival_minutes
            ),
            RiskLevel::High => format!(
                "{}区域火险较高({:.1}%),优先部署{}以形成有效覆盖。",
                region.region_id,
                region.risk_score * 100.0,
                type_name
            ),
            _ => format!(
                "预防性部署{}至{}区域,用于火情监测与快速响应。",
                type_name, region.region_id
            ),
        }
    }
}

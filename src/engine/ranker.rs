// ==========================================
// 森林防火资源调度系统 - 推荐排序与汇总引擎
// ==========================================
// 职责: 全局排序、截断、成本合计与台账汇总
// 输入: 各区域推荐汇集 + 台账快照
// 输出: 有序推荐列表(有界) + 汇总指标
// ==========================================

use crate::domain::recommendation::{CatalogSummary, Recommendation, TypeSummary};
use crate::domain::resource::Resource;
use crate::domain::types::ResourceStatus;
use std::cmp::Ordering;

/// 单次优化返回的推荐数量上限
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 15;

// ==========================================
// RecommendationRanker - 推荐排序引擎
// ==========================================
pub struct RecommendationRanker {
    max_recommendations: usize,
}

impl RecommendationRanker {
    /// 构造函数
    ///
    /// # 参数
    /// - `max_recommendations`: 返回列表的数量上限
    pub fn new(max_recommendations: usize) -> Self {
        Self {
            max_recommendations,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 全局排序并截断
    ///
    /// 排序键:
    /// 1) 优先级等级升序（紧急在前）
    /// 2) 效果评分降序
    /// 稳定排序,同键保持分配产出顺序（确定性）
    pub fn rank(&self, mut recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
        recommendations.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then_with(|| {
                    b.effectiveness_score
                        .partial_cmp(&a.effectiveness_score)
                        .unwrap_or(Ordering::Equal)
                })
        });
        recommendations.truncate(self.max_recommendations);
        recommendations
    }

    /// 返回列表（截断后）的成本合计
    pub fn total_cost(recommendations: &[Recommendation]) -> f64 {
        recommendations.iter().map(|r| r.cost_estimate).sum()
    }

    /// 生成台账汇总
    ///
    /// 包含: 按状态/类型的数量统计、各类型可调度总容量、
    /// 各类型可调度资源的平均基础响应时间（无可调度资源时为 0）
    pub fn summarize_catalog(snapshot: &[Resource]) -> CatalogSummary {
        let mut summary = CatalogSummary {
            total_resources: snapshot.len(),
            ..CatalogSummary::default()
        };

        // 平均值分母: 各类型可调度资源数
        for resource in snapshot {
            match resource.status {
                ResourceStatus::Available => summary.available += 1,
                ResourceStatus::Deployed => summary.deployed += 1,
                ResourceStatus::Maintenance => summary.maintenance += 1,
            }

            let entry = summary
                .by_type
                .entry(resource.resource_type)
                .or_insert_with(TypeSummary::default);
            entry.count_status(resource.status);

            if resource.status == ResourceStatus::Available {
                entry.total_available_capacity += resource.capacity;
                // 先累加,遍历结束后再除
                entry.avg_response_time_minutes += resource.base_response_time_minutes as f64;
            }
        }

        for entry in summary.by_type.values_mut() {
            if entry.available > 0 {
                entry.avg_response_time_minutes /= entry.available as f64;
            } else {
                // 除零防护: 无可调度资源时平均响应时间记 0
                entry.avg_response_time_minutes = 0.0;
            }
        }

        summary
    }
}

impl Default for RecommendationRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECOMMENDATIONS)
    }
}

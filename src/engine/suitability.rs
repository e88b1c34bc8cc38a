// ==========================================
// 森林防火资源调度系统 - 适配度评分引擎
// ==========================================
// 职责: 对 (资源, 区域) 组合计算归一化适配度
// 输入: 资源 + 距离 + 到场时间
// 输出: [0,1] 区间的适配度(分项可解释)
// 红线: 纯函数,无 I/O,无随机性
// ==========================================

use crate::domain::resource::Resource;
use serde::{Deserialize, Serialize};

/// 距离归一化上限（公里）
pub const MAX_EFFECTIVE_DISTANCE_KM: f64 = 100.0;
/// 到场时间归一化上限（分钟）
pub const MAX_EFFECTIVE_TIME_MINUTES: f64 = 180.0;
/// 成本归一化上限（每小时）
pub const MAX_EFFECTIVE_COST_PER_HOUR: f64 = 20_000.0;

// ==========================================
// ScoringWeights - 适配度权重
// ==========================================
// 权重和必须为 1.0,保证总分落在 [0,1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub distance: f64,
    pub effectiveness: f64,
    pub cost: f64,
    pub time: f64,
}

impl ScoringWeights {
    /// 权重合法性检查
    ///
    /// # 返回
    /// - Ok(()): 各权重非负且总和为 1.0（容差 1e-6）
    pub fn validate(&self) -> Result<(), String> {
        let weights = [self.distance, self.effectiveness, self.cost, self.time];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(format!("权重必须为非负有限数: {:?}", self));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(format!("权重总和必须为1.0, 实际为{}", sum));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 0.25,
            effectiveness: 0.30,
            cost: 0.20,
            time: 0.25,
        }
    }
}

// ==========================================
// SuitabilityScore - 适配度评分明细
// ==========================================
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SuitabilityScore {
    pub distance_score: f64,
    pub time_score: f64,
    pub effectiveness_score: f64,
    pub cost_score: f64,
    pub total: f64,
}

// ==========================================
// SuitabilityScorer - 适配度评分引擎
// ==========================================
pub struct SuitabilityScorer {
    weights: ScoringWeights,
}

impl SuitabilityScorer {
    /// 构造函数
    ///
    /// # 参数
    /// - `weights`: 评分权重（调用方负责预先校验）
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// 计算适配度
    ///
    /// 分项:
    /// - distance_score = max(0, 1 - distance/100)
    /// - time_score     = max(0, 1 - travel_time/180)
    /// - effectiveness  = 资源效能评级
    /// - cost_score     = max(0, 1 - cost_per_hour/20000)
    /// 各分项钳制到非负,总分为加权和,落在 [0,1]
    ///
    /// # 参数
    /// - `resource`: 候选资源
    /// - `distance_km`: 到区域的距离
    /// - `travel_time_minutes`: 到场时间
    pub fn score(
        &self,
        resource: &Resource,
        distance_km: f64,
        travel_time_minutes: i64,
    ) -> SuitabilityScore {
        let distance_score = (1.0 - distance_km / MAX_EFFECTIVE_DISTANCE_KM).max(0.0);
        let time_score =
            (1.0 - travel_time_minutes as f64 / MAX_EFFECTIVE_TIME_MINUTES).max(0.0);
        let effectiveness_score = resource.effectiveness_rating;
        let cost_score =
            (1.0 - resource.operational_cost_per_hour / MAX_EFFECTIVE_COST_PER_HOUR).max(0.0);

        let total = distance_score * self.weights.distance
            + effectiveness_score * self.weights.effectiveness
            + cost_score * self.weights.cost
            + time_score * self.weights.time;

        SuitabilityScore {
            distance_score,
            time_score,
            effectiveness_score,
            cost_score,
            total,
        }
    }
}

impl Default for SuitabilityScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

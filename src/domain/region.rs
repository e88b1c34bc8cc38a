// ==========================================
// 森林防火资源调度系统 - 区域风险画像
// ==========================================
// 职责: 承载上游风险预测服务输出的区域描述
// 说明: 每次优化调用外部传入,引擎不持久化
// ==========================================

use crate::domain::geo::GeoPoint;
use crate::domain::types::{Accessibility, RiskLevel, TerrainDifficulty, VegetationDensity};
use serde::{Deserialize, Serialize};

// ==========================================
// RegionRiskDescriptor - 区域风险画像
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRiskDescriptor {
    pub region_id: String,
    pub coordinates: GeoPoint,
    pub risk_score: f64, // 风险分值 [0,1]
    pub terrain_difficulty: TerrainDifficulty,
    pub vegetation_density: VegetationDensity,
    pub accessibility: Accessibility,
}

impl RegionRiskDescriptor {
    /// 派生火险等级（不存储,始终由分值计算）
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

// ==========================================
// 森林防火资源调度系统 - 调度推荐模型
// ==========================================
// 红线: 推荐在单次优化调用内生成,生成后不可变
// 红线: 单次优化内同一 resource_id 至多出现一次
// ==========================================

use crate::domain::geo::GeoPoint;
use crate::domain::requirement::FulfillmentRecord;
use crate::domain::types::{Priority, ResourceStatus, ResourceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Recommendation - 资源部署推荐
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub resource_id: String,
    pub resource_type: ResourceType,
    pub priority: Priority,
    pub region_id: String,
    pub deployment_location: GeoPoint,
    pub estimated_arrival_minutes: i64,
    pub recommended_duration_hours: f64,
    pub cost_estimate: f64,
    pub effectiveness_score: f64,
    /// 人读理由文案
    pub justification: String,
}

// ==========================================
// TypeSummary - 单类型资源汇总
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeSummary {
    pub total: usize,
    pub available: usize,
    pub deployed: usize,
    pub maintenance: usize,
    /// 可调度资源的总容量
    pub total_available_capacity: f64,
    /// 可调度资源的平均基础响应时间（分钟,无可调度资源时为 0）
    pub avg_response_time_minutes: f64,
}

impl TypeSummary {
    /// 累计一条资源记录
    pub fn count_status(&mut self, status: ResourceStatus) {
        self.total += 1;
        match status {
            ResourceStatus::Available => self.available += 1,
            ResourceStatus::Deployed => self.deployed += 1,
            ResourceStatus::Maintenance => self.maintenance += 1,
        }
    }
}

// ==========================================
// CatalogSummary - 资源台账汇总
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_resources: usize,
    pub available: usize,
    pub deployed: usize,
    pub maintenance: usize,
    pub by_type: HashMap<ResourceType, TypeSummary>,
}

// ==========================================
// OptimizationReport - 优化结果报告
// ==========================================
// 对外接口的完整返回载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    /// 排序并截断后的推荐列表
    pub recommendations: Vec<Recommendation>,
    /// 返回列表（截断后）的成本合计
    pub total_cost: f64,
    pub resource_status: CatalogSummary,
    /// 各区域各类型的请求量与实际满足量
    pub fulfillment: Vec<FulfillmentRecord>,
}

// ==========================================
// 森林防火资源调度系统 - 优化运行记录
// ==========================================
// 职责: 每次优化调用留痕,供驾驶舱回溯
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// DispatchRunRecord - 单次优化运行记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRunRecord {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub region_count: usize,
    pub recommendation_count: usize,
    pub total_cost: f64,
    /// 附加信息 (JSON 格式,可选)
    pub detail: Option<String>,
}

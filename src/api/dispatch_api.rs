// ==========================================
// 森林防火资源调度系统 - 调度业务接口
// ==========================================
// 职责: 对外暴露优化计算与资源状态管理
// 红线: 优化是只读计算,状态变更是独立的显式操作
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator;
use crate::config::DispatchConfigReader;
use crate::domain::geo::GeoPoint;
use crate::domain::recommendation::{CatalogSummary, OptimizationReport};
use crate::domain::region::RegionRiskDescriptor;
use crate::domain::run_log::DispatchRunRecord;
use crate::domain::types::ResourceStatus;
use crate::engine::events::{DispatchEvent, OptionalEventPublisher};
use crate::engine::orchestrator::DispatchOrchestrator;
use crate::engine::ranker::RecommendationRanker;
use crate::repository::resource_repo::ResourceRepository;
use crate::repository::run_log_repo::DispatchRunLogRepository;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

// ==========================================
// DispatchApi - 调度业务接口
// ==========================================
pub struct DispatchApi<C>
where
    C: DispatchConfigReader,
{
    resource_repo: Arc<ResourceRepository>,
    run_log_repo: Arc<DispatchRunLogRepository>,
    config: Arc<C>,
    events: OptionalEventPublisher,
}

impl<C> DispatchApi<C>
where
    C: DispatchConfigReader,
{
    /// 创建新的调度接口实例
    ///
    /// # 参数
    /// - `resource_repo`: 资源台账仓储
    /// - `run_log_repo`: 运行记录仓储
    /// - `config`: 配置读取器
    /// - `events`: 事件发布者（可选）
    pub fn new(
        resource_repo: Arc<ResourceRepository>,
        run_log_repo: Arc<DispatchRunLogRepository>,
        config: Arc<C>,
        events: OptionalEventPublisher,
    ) -> Self {
        Self {
            resource_repo,
            run_log_repo,
            config,
            events,
        }
    }

    // ==========================================
    // 优化计算
    // ==========================================

    /// 执行一次资源调度优化
    ///
    /// 流程:
    /// 1) 整批校验区域画像（任一不合格则整次拒绝）
    /// 2) 解析配置快照
    /// 3) 一次性读取台账一致性快照
    /// 4) 纯函数流水线计算（不触碰台账）
    /// 5) 运行留痕 + 事件发布
    ///
    /// # 参数
    /// - `regions`: 区域风险画像列表
    ///
    /// # 返回
    /// 优化结果报告
    pub async fn optimize(
        &self,
        regions: Vec<RegionRiskDescriptor>,
    ) -> ApiResult<OptimizationReport> {
        validator::validate_regions(&regions)?;

        let config = self
            .config
            .load_dispatch_config()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        let snapshot = self.resource_repo.list_all()?;

        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        info!(run_id = %run_id, region_count = regions.len(), "收到优化请求");

        let orchestrator = DispatchOrchestrator::new(&config);
        let outcome = orchestrator.optimize(&regions, &snapshot);

        let report = OptimizationReport {
            run_id: run_id.clone(),
            generated_at: started_at,
            recommendations: outcome.recommendations,
            total_cost: outcome.total_cost,
            resource_status: outcome.catalog_summary,
            fulfillment: outcome.fulfillment,
        };

        // 运行留痕
        let record = DispatchRunRecord {
            run_id: run_id.clone(),
            started_at,
            region_count: regions.len(),
            recommendation_count: report.recommendations.len(),
            total_cost: report.total_cost,
            detail: Some(
                json!({
                    "regions": regions.iter().map(|r| r.region_id.as_str()).collect::<Vec<_>>(),
                })
                .to_string(),
            ),
        };
        self.run_log_repo.append(&record)?;

        // 事件发布失败不影响本次结果
        if let Err(e) = self
            .events
            .publish(DispatchEvent::run_completed(run_id, None))
        {
            warn!("优化完成事件发布失败: {}", e);
        }

        Ok(report)
    }

    // ==========================================
    // 资源状态管理
    // ==========================================

    /// 更新资源状态（可同时更新位置）
    ///
    /// 部署执行方在操作员接受推荐后调用;
    /// 任意状态间的转换都被接受（显式覆写）
    ///
    /// # 返回
    /// - Ok(()): 更新成功
    /// - Err(NotFound): resource_id 不存在,台账保持不变
    pub async fn update_resource_status(
        &self,
        resource_id: &str,
        new_status: ResourceStatus,
        new_location: Option<GeoPoint>,
    ) -> ApiResult<()> {
        if let Some(location) = &new_location {
            validator::validate_location(resource_id, location)?;
        }

        // 非常规转换仅告警,不拒绝
        if let Some(current) = self.resource_repo.find_by_id(resource_id)? {
            if current.status == ResourceStatus::Maintenance
                && new_status == ResourceStatus::Deployed
            {
                warn!(
                    resource_id,
                    "维护中的资源被直接置为已部署,按显式覆写处理"
                );
            }
        }

        self.resource_repo
            .update_status(resource_id, new_status, new_location)?;

        info!(resource_id, new_status = %new_status, "资源状态已更新");

        if let Err(e) = self.events.publish(DispatchEvent::status_changed(
            resource_id.to_string(),
            Some(new_status.to_db_str().to_string()),
        )) {
            warn!("状态变更事件发布失败: {}", e);
        }

        Ok(())
    }

    // ==========================================
    // 台账查询
    // ==========================================

    /// 获取资源台账汇总
    pub async fn get_resource_status_summary(&self) -> ApiResult<CatalogSummary> {
        let snapshot = self.resource_repo.list_all()?;
        Ok(RecommendationRanker::summarize_catalog(&snapshot))
    }

    /// 查询最近的优化运行记录
    pub async fn list_recent_runs(&self, limit: usize) -> ApiResult<Vec<DispatchRunRecord>> {
        Ok(self.run_log_repo.list_recent(limit)?)
    }
}

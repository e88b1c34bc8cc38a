// ==========================================
// 森林防火资源调度系统 - 台账导入器
// ==========================================
// 职责: 从 CSV 花名册导入资源台账
// 红线: 任一行数据质量不合格则整批失败,不落库
// ==========================================

use crate::domain::geo::GeoPoint;
use crate::domain::resource::Resource;
use crate::domain::types::{ResourceStatus, ResourceType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::resource_repo::ResourceRepository;
use chrono::Utc;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

// ==========================================
// CSV 行结构
// ==========================================
// 列: resource_id,resource_type,lat,lng,capacity,status,
//     base_response_time_minutes,operational_cost_per_hour,effectiveness_rating
#[derive(Debug, Deserialize)]
struct CatalogCsvRow {
    resource_id: String,
    resource_type: String,
    lat: f64,
    lng: f64,
    capacity: f64,
    status: String,
    base_response_time_minutes: i64,
    operational_cost_per_hour: f64,
    effectiveness_rating: f64,
}

impl CatalogCsvRow {
    /// 校验并转换为领域实体
    ///
    /// # 参数
    /// - `line`: 数据行号（报错定位用,表头为第 1 行）
    fn validate(self, line: usize) -> RepositoryResult<Resource> {
        let fail = |message: String| RepositoryError::ValidationError(format!("第{}行: {}", line, message));

        if self.resource_id.trim().is_empty() {
            return Err(fail("resource_id 不能为空".to_string()));
        }

        let resource_type = ResourceType::from_str(&self.resource_type)
            .ok_or_else(|| fail(format!("未知资源类型: {}", self.resource_type)))?;

        let status = ResourceStatus::from_str(&self.status)
            .ok_or_else(|| fail(format!("未知资源状态: {}", self.status)))?;

        let location = GeoPoint::new(self.lat, self.lng);
        if !location.is_valid() {
            return Err(fail(format!("坐标非法: {}", location)));
        }

        if !(0.0..=1.0).contains(&self.effectiveness_rating) {
            return Err(fail(format!(
                "效能评级必须在[0,1]区间: {}",
                self.effectiveness_rating
            )));
        }

        if self.capacity < 0.0 || !self.capacity.is_finite() {
            return Err(fail(format!("容量非法: {}", self.capacity)));
        }

        if self.operational_cost_per_hour < 0.0 || !self.operational_cost_per_hour.is_finite() {
            return Err(fail(format!("运行成本非法: {}", self.operational_cost_per_hour)));
        }

        if self.base_response_time_minutes < 0 {
            return Err(fail(format!(
                "基础响应时间非法: {}",
                self.base_response_time_minutes
            )));
        }

        let now = Utc::now();
        Ok(Resource {
            resource_id: self.resource_id.trim().to_string(),
            resource_type,
            location,
            capacity: self.capacity,
            status,
            base_response_time_minutes: self.base_response_time_minutes,
            operational_cost_per_hour: self.operational_cost_per_hour,
            effectiveness_rating: self.effectiveness_rating,
            created_at: now,
            updated_at: now,
        })
    }
}

// ==========================================
// ImportReport - 导入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub imported: usize,
}

// ==========================================
// CatalogImporter - 台账导入器
// ==========================================
pub struct CatalogImporter<'a> {
    repo: &'a ResourceRepository,
}

impl<'a> CatalogImporter<'a> {
    /// 构造函数
    ///
    /// # 参数
    /// - `repo`: 资源台账仓储
    pub fn new(repo: &'a ResourceRepository) -> Self {
        Self { repo }
    }

    /// 导入 CSV 花名册
    ///
    /// 两阶段: 先整文件解析校验,全部通过后再单事务落库;
    /// 任一行失败则整批终止,台账保持不变
    ///
    /// # 参数
    /// - `path`: CSV 文件路径
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入记录数
    /// - Err(ValidationError): 首个不合格行的定位与原因
    pub fn import_csv(&self, path: &Path) -> RepositoryResult<ImportReport> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            RepositoryError::ValidationError(format!("CSV 文件打开失败: {}", e))
        })?;

        let mut resources = Vec::new();
        for (index, row) in reader.deserialize::<CatalogCsvRow>().enumerate() {
            // 表头占第 1 行,数据从第 2 行起
            let line = index + 2;
            let row = row.map_err(|e| {
                RepositoryError::ValidationError(format!("第{}行: CSV 解析失败: {}", line, e))
            })?;
            resources.push(row.validate(line)?);
        }

        let imported = self.repo.upsert_batch(&resources)?;
        info!(imported, path = %path.display(), "台账导入完成");

        Ok(ImportReport { imported })
    }
}

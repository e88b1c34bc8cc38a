// ==========================================
// 森林防火资源调度系统 - 运行记录仓储
// ==========================================
// 职责: dispatch_run_log 表的追加与查询
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::run_log::DispatchRunRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// DispatchRunLogRepository - 运行记录仓储
// ==========================================
pub struct DispatchRunLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DispatchRunLogRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 追加一条运行记录
    pub fn append(&self, record: &DispatchRunRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO dispatch_run_log (
                run_id, started_at, region_count, recommendation_count, total_cost, detail
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                record.run_id,
                record.started_at.to_rfc3339(),
                record.region_count as i64,
                record.recommendation_count as i64,
                record.total_cost,
                record.detail,
            ],
        )?;
        Ok(())
    }

    /// 查询最近的运行记录（按开始时间倒序）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<DispatchRunRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT run_id, started_at, region_count, recommendation_count, total_cost, detail
            FROM dispatch_run_log
            ORDER BY started_at DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, Option<String>>(5)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(run_id, started_at, regions, recs, cost, detail)| {
                let started_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&started_at)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| RepositoryError::FieldValueError {
                        field: "started_at".to_string(),
                        message: format!("时间戳解析失败: {} ({})", started_at, e),
                    })?;

                Ok(DispatchRunRecord {
                    run_id,
                    started_at,
                    region_count: regions as usize,
                    recommendation_count: recs as usize,
                    total_cost: cost,
                    detail,
                })
            })
            .collect()
    }
}

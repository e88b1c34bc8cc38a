// ==========================================
// 森林防火资源调度系统 - 资源台账仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: 未知 resource_type / status 解码即失败
// 说明: 快照读取与状态更新共用同一连接互斥锁,
//       单次 list_all 即为一致性时点快照
// ==========================================

use crate::domain::geo::GeoPoint;
use crate::domain::resource::Resource;
use crate::domain::types::{ResourceStatus, ResourceType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// resource 表的列清单（SELECT 共用）
const RESOURCE_COLUMNS: &str = r#"
    resource_id, resource_type, lat, lng, capacity, status,
    base_response_time_minutes, operational_cost_per_hour,
    effectiveness_rating, created_at, updated_at
"#;

/// 从数据库读出的原始行（解码前）
struct ResourceRow {
    resource_id: String,
    resource_type: String,
    lat: f64,
    lng: f64,
    capacity: f64,
    status: String,
    base_response_time_minutes: i64,
    operational_cost_per_hour: f64,
    effectiveness_rating: f64,
    created_at: String,
    updated_at: String,
}

impl ResourceRow {
    /// 解码为领域实体
    ///
    /// # 返回
    /// - Err(ValidationError/FieldValueError): 未知类型/状态或时间戳损坏,
    ///   必须显式失败,不得按默认值继续
    fn decode(self) -> RepositoryResult<Resource> {
        let resource_type = ResourceType::from_str(&self.resource_type).ok_or_else(|| {
            RepositoryError::ValidationError(format!(
                "未知资源类型: resource_id={}, resource_type={}",
                self.resource_id, self.resource_type
            ))
        })?;

        let status = ResourceStatus::from_str(&self.status).ok_or_else(|| {
            RepositoryError::ValidationError(format!(
                "未知资源状态: resource_id={}, status={}",
                self.resource_id, self.status
            ))
        })?;

        let created_at = parse_timestamp("created_at", &self.created_at)?;
        let updated_at = parse_timestamp("updated_at", &self.updated_at)?;

        Ok(Resource {
            resource_id: self.resource_id,
            resource_type,
            location: GeoPoint::new(self.lat, self.lng),
            capacity: self.capacity,
            status,
            base_response_time_minutes: self.base_response_time_minutes,
            operational_cost_per_hour: self.operational_cost_per_hour,
            effectiveness_rating: self.effectiveness_rating,
            created_at,
            updated_at,
        })
    }
}

fn parse_timestamp(field: &str, raw: &str) -> RepositoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::FieldValueError {
            field: field.to_string(),
            message: format!("时间戳解析失败: {} ({})", raw, e),
        })
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ResourceRow> {
    Ok(ResourceRow {
        resource_id: row.get(0)?,
        resource_type: row.get(1)?,
        lat: row.get(2)?,
        lng: row.get(3)?,
        capacity: row.get(4)?,
        status: row.get(5)?,
        base_response_time_minutes: row.get(6)?,
        operational_cost_per_hour: row.get(7)?,
        effectiveness_rating: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

// ==========================================
// ResourceRepository - 资源台账仓储
// ==========================================
pub struct ResourceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ResourceRepository {
    /// 创建新的资源台账仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入或更新单条资源
    pub fn upsert_single(&self, resource: &Resource) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::upsert_on(&conn, resource)
    }

    /// 批量插入或更新资源（单事务,任一条失败则整体回滚）
    ///
    /// # 返回
    /// - Ok(usize): 写入的记录数
    pub fn upsert_batch(&self, resources: &[Resource]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        for resource in resources {
            Self::upsert_on(&tx, resource)?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(resources.len())
    }

    fn upsert_on(conn: &Connection, resource: &Resource) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT OR REPLACE INTO resource (
                resource_id, resource_type, lat, lng, capacity, status,
                base_response_time_minutes, operational_cost_per_hour,
                effectiveness_rating, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                resource.resource_id,
                resource.resource_type.to_db_str(),
                resource.location.lat,
                resource.location.lng,
                resource.capacity,
                resource.status.to_db_str(),
                resource.base_response_time_minutes,
                resource.operational_cost_per_hour,
                resource.effectiveness_rating,
                resource.created_at.to_rfc3339(),
                resource.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 按主键查询单条资源
    pub fn find_by_id(&self, resource_id: &str) -> RepositoryResult<Option<Resource>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM resource WHERE resource_id = ?1", RESOURCE_COLUMNS);

        let row = conn
            .query_row(&sql, params![resource_id], map_row)
            .optional()?;

        row.map(ResourceRow::decode).transpose()
    }

    /// 读取全量台账快照
    ///
    /// 单条 SQL 在连接互斥锁内完成,即为一致性时点快照;
    /// 并发状态更新不会污染本次快照
    pub fn list_all(&self) -> RepositoryResult<Vec<Resource>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM resource ORDER BY resource_id", RESOURCE_COLUMNS);

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], map_row)?
            .collect::<rusqlite::Result<Vec<ResourceRow>>>()?;

        rows.into_iter().map(ResourceRow::decode).collect()
    }

    /// 按类型查询可调度资源（status == AVAILABLE）
    pub fn list_available_by_type(
        &self,
        resource_type: ResourceType,
    ) -> RepositoryResult<Vec<Resource>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT {}
            FROM resource
            WHERE resource_type = ?1 AND status = 'AVAILABLE'
            ORDER BY resource_id
            "#,
            RESOURCE_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![resource_type.to_db_str()], map_row)?
            .collect::<rusqlite::Result<Vec<ResourceRow>>>()?;

        rows.into_iter().map(ResourceRow::decode).collect()
    }

    /// 更新资源状态（可同时更新位置）
    ///
    /// 任意状态间的转换都被接受（数据操作,不是流程控制）
    ///
    /// # 返回
    /// - Ok(()): 更新成功
    /// - Err(NotFound): resource_id 不存在,台账保持不变
    pub fn update_status(
        &self,
        resource_id: &str,
        new_status: ResourceStatus,
        new_location: Option<GeoPoint>,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let now = Utc::now().to_rfc3339();

        let affected = match new_location {
            Some(location) => conn.execute(
                r#"
                UPDATE resource
                SET status = ?1, lat = ?2, lng = ?3, updated_at = ?4
                WHERE resource_id = ?5
                "#,
                params![new_status.to_db_str(), location.lat, location.lng, now, resource_id],
            )?,
            None => conn.execute(
                "UPDATE resource SET status = ?1, updated_at = ?2 WHERE resource_id = ?3",
                params![new_status.to_db_str(), now, resource_id],
            )?,
        };

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Resource".to_string(),
                id: resource_id.to_string(),
            });
        }

        Ok(())
    }

    /// 台账记录总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM resource", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

// ==========================================
// 森林防火资源调度系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// - 集中建表语句,保证库结构一致
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// 表:
/// - resource: 资源台账（resource_id 主键,status/location 为仅有的可变业务字段）
/// - dispatch_run_log: 优化运行记录
/// - config_kv: 全局配置键值表
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS resource (
            resource_id                TEXT PRIMARY KEY,
            resource_type              TEXT NOT NULL,
            lat                        REAL NOT NULL,
            lng                        REAL NOT NULL,
            capacity                   REAL NOT NULL,
            status                     TEXT NOT NULL,
            base_response_time_minutes INTEGER NOT NULL,
            operational_cost_per_hour  REAL NOT NULL,
            effectiveness_rating       REAL NOT NULL,
            created_at                 TEXT NOT NULL,
            updated_at                 TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_resource_type_status
            ON resource (resource_type, status);

        CREATE TABLE IF NOT EXISTS dispatch_run_log (
            run_id               TEXT PRIMARY KEY,
            started_at           TEXT NOT NULL,
            region_count         INTEGER NOT NULL,
            recommendation_count INTEGER NOT NULL,
            total_cost           REAL NOT NULL,
            detail               TEXT
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id   TEXT NOT NULL,
            key        TEXT NOT NULL,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )?;
    Ok(())
}

// ==========================================
// 森林防火资源调度系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::dispatch_config_trait::DispatchConfigReader;
use crate::db::open_sqlite_connection;
use crate::engine::suitability::ScoringWeights;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 配置键全集
pub mod config_keys {
    pub const WEIGHT_DISTANCE: &str = "dispatch/weight_distance";
    pub const WEIGHT_EFFECTIVENESS: &str = "dispatch/weight_effectiveness";
    pub const WEIGHT_COST: &str = "dispatch/weight_cost";
    pub const WEIGHT_TIME: &str = "dispatch/weight_time";
    pub const MAX_RECOMMENDATIONS: &str = "dispatch/max_recommendations";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致,会对传入连接再次应用统一 PRAGMA（幂等）
    pub fn from_connection(
        conn: Arc<Mutex<Connection>>,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（scope_id='global',覆盖旧值）
    pub fn set_config_value(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取 f64 配置,缺失时返回默认值,非法值报错
    fn get_f64_or(&self, key: &str, default: f64) -> Result<f64, Box<dyn Error + Send + Sync>> {
        match self.get_config_value(key)? {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("配置{}解析失败: {} ({})", key, raw, e).into()),
            None => Ok(default),
        }
    }

    /// 读取 usize 配置,缺失时返回默认值,非法值报错
    fn get_usize_or(
        &self,
        key: &str,
        default: usize,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        match self.get_config_value(key)? {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("配置{}解析失败: {} ({})", key, raw, e).into()),
            None => Ok(default),
        }
    }
}

// ==========================================
// DispatchConfigReader 实现
// ==========================================
#[async_trait]
impl DispatchConfigReader for ConfigManager {
    async fn get_scoring_weights(&self) -> Result<ScoringWeights, Box<dyn Error + Send + Sync>> {
        let defaults = ScoringWeights::default();
        Ok(ScoringWeights {
            distance: self.get_f64_or(config_keys::WEIGHT_DISTANCE, defaults.distance)?,
            effectiveness: self
                .get_f64_or(config_keys::WEIGHT_EFFECTIVENESS, defaults.effectiveness)?,
            cost: self.get_f64_or(config_keys::WEIGHT_COST, defaults.cost)?,
            time: self.get_f64_or(config_keys::WEIGHT_TIME, defaults.time)?,
        })
    }

    async fn get_max_recommendations(&self) -> Result<usize, Box<dyn Error + Send + Sync>> {
        self.get_usize_or(
            config_keys::MAX_RECOMMENDATIONS,
            crate::engine::ranker::DEFAULT_MAX_RECOMMENDATIONS,
        )
    }
}

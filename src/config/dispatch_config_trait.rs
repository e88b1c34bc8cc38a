// ==========================================
// 森林防火资源调度系统 - 调度配置读取 Trait
// ==========================================
// 职责: 定义优化引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::engine::suitability::ScoringWeights;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;

// ==========================================
// DispatchConfig - 调度配置快照
// ==========================================
// 一次优化调用开始时解析一次,流程中不再变化
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// 适配度评分权重
    pub weights: ScoringWeights,
    /// 单次优化返回的推荐数量上限
    pub max_recommendations: usize,
}

impl DispatchConfig {
    /// 配置合法性检查
    pub fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;
        if self.max_recommendations == 0 {
            return Err("推荐数量上限必须大于0".to_string());
        }
        Ok(())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            max_recommendations: crate::engine::ranker::DEFAULT_MAX_RECOMMENDATIONS,
        }
    }
}

// ==========================================
// DispatchConfigReader Trait
// ==========================================
// 用途: 优化流程所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）/ StaticDispatchConfig（内存固定值）
#[async_trait]
pub trait DispatchConfigReader: Send + Sync {
    /// 获取适配度评分权重
    ///
    /// # 默认值
    /// - distance 0.25 / effectiveness 0.30 / cost 0.20 / time 0.25
    async fn get_scoring_weights(&self) -> Result<ScoringWeights, Box<dyn Error + Send + Sync>>;

    /// 获取推荐数量上限
    ///
    /// # 默认值
    /// - 15
    async fn get_max_recommendations(&self) -> Result<usize, Box<dyn Error + Send + Sync>>;

    /// 解析完整配置快照并校验
    async fn load_dispatch_config(&self) -> Result<DispatchConfig, Box<dyn Error + Send + Sync>> {
        let config = DispatchConfig {
            weights: self.get_scoring_weights().await?,
            max_recommendations: self.get_max_recommendations().await?,
        };
        config.validate().map_err(|e| -> Box<dyn Error + Send + Sync> { e.into() })?;
        Ok(config)
    }
}

// ==========================================
// StaticDispatchConfig - 内存固定配置
// ==========================================
// 用途: 测试与无配置表场景
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDispatchConfig {
    pub config: DispatchConfig,
}

#[async_trait]
impl DispatchConfigReader for StaticDispatchConfig {
    async fn get_scoring_weights(&self) -> Result<ScoringWeights, Box<dyn Error + Send + Sync>> {
        Ok(self.config.weights)
    }

    async fn get_max_recommendations(&self) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Ok(self.config.max_recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DispatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = DispatchConfig {
            weights: ScoringWeights::default(),
            max_recommendations: 0,
        };
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_static_reader_returns_defaults() {
        let reader = StaticDispatchConfig::default();
        let config = reader.load_dispatch_config().await.unwrap();
        assert_eq!(config.max_recommendations, 15);
        assert!((config.weights.effectiveness - 0.30).abs() < 1e-9);
    }
}

// ==========================================
// 森林防火资源调度系统 - 引擎层事件发布
// ==========================================
// 职责: 定义调度事件发布 trait,实现依赖倒置
// 说明: Engine 层定义 trait,下游(通知/刷新)实现适配器
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 调度事件类型
// ==========================================

/// 调度事件触发类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchEventType {
    /// 资源状态变更
    ResourceStatusChanged,
    /// 优化运行完成
    OptimizationCompleted,
    /// 台账导入完成
    CatalogImported,
}

impl DispatchEventType {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            DispatchEventType::ResourceStatusChanged => "ResourceStatusChanged",
            DispatchEventType::OptimizationCompleted => "OptimizationCompleted",
            DispatchEventType::CatalogImported => "CatalogImported",
        }
    }
}

/// 调度事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchEvent {
    pub event_type: DispatchEventType,
    /// 关联资源（状态变更事件）
    pub resource_id: Option<String>,
    /// 关联优化运行（运行完成事件）
    pub run_id: Option<String>,
    /// 附加信息
    pub detail: Option<String>,
}

impl DispatchEvent {
    /// 资源状态变更事件
    pub fn status_changed(resource_id: String, detail: Option<String>) -> Self {
        Self {
            event_type: DispatchEventType::ResourceStatusChanged,
            resource_id: Some(resource_id),
            run_id: None,
            detail,
        }
    }

    /// 优化运行完成事件
    pub fn run_completed(run_id: String, detail: Option<String>) -> Self {
        Self {
            event_type: DispatchEventType::OptimizationCompleted,
            resource_id: None,
            run_id: Some(run_id),
            detail,
        }
    }

    /// 台账导入完成事件
    pub fn catalog_imported(detail: Option<String>) -> Self {
        Self {
            event_type: DispatchEventType::CatalogImported,
            resource_id: None,
            run_id: None,
            detail,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 调度事件发布者 Trait
///
/// Engine 层定义,下游系统实现;
/// 通过 trait 解除引擎对通知/刷新系统的直接依赖
pub trait DispatchEventPublisher: Send + Sync {
    /// 发布调度事件
    ///
    /// # 返回
    /// - `Ok(task_id)`: 下游任务 ID（如果支持）或空字符串
    /// - `Err`: 发布失败
    fn publish(&self, event: DispatchEvent) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
///
/// 用于不需要事件发布的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl DispatchEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: DispatchEvent) -> Result<String, Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - event_type={}",
            event.event_type.as_str()
        );
        Ok(String::new())
    }
}

/// 可选的事件发布者包装
///
/// 简化 Option<Arc<dyn DispatchEventPublisher>> 的使用
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn DispatchEventPublisher>>,
}

impl OptionalEventPublisher {
    /// 创建带发布者的实例
    pub fn with_publisher(publisher: Arc<dyn DispatchEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    /// 创建空实例（不发布事件）
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（如果有发布者）
    pub fn publish(&self, event: DispatchEvent) -> Result<String, Box<dyn Error + Send + Sync>> {
        match &self.inner {
            Some(publisher) => publisher.publish(event),
            None => {
                tracing::debug!(
                    "OptionalEventPublisher: 未配置发布者,跳过事件 - event_type={}",
                    event.event_type.as_str()
                );
                Ok(String::new())
            }
        }
    }

    /// 检查是否配置了发布者
    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}

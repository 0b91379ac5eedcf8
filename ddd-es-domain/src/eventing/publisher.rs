use crate::error::DomainResult;
use crate::persist::SerializedEvent;
use async_trait::async_trait;
use std::sync::Arc;

/// 事件发布器：把已持久化的事件交给下游（日志、进程内总线、消息系统等）
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &SerializedEvent) -> DomainResult<()>;

    /// 按顺序逐条发布，遇到第一个错误即返回
    async fn publish_all(&self, events: &[SerializedEvent]) -> DomainResult<()> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<T> EventPublisher for Arc<T>
where
    T: EventPublisher + ?Sized,
{
    async fn publish(&self, event: &SerializedEvent) -> DomainResult<()> {
        (**self).publish(event).await
    }
}

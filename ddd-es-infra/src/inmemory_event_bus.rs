//! 内存版事件总线（InMemoryEventBus）
//!
//! 基于 `tokio::sync::broadcast` 的进程内发布器：
//! - `publish`：克隆并广播事件，无订阅者时直接丢弃；
//! - `subscribe`：返回 `'static` 生命周期事件流，便于在 `tokio::spawn` 中消费；
//! - 订阅者消费过慢导致缓冲区溢出时，事件流产出一条错误后继续。

use async_trait::async_trait;
use ddd_es_domain::error::{DomainError, DomainResult};
use ddd_es_domain::eventing::EventPublisher;
use ddd_es_domain::persist::SerializedEvent;
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

#[derive(Clone)]
pub struct InMemoryEventBus {
    tx: broadcast::Sender<SerializedEvent>,
}

impl InMemoryEventBus {
    /// `capacity` 为广播缓冲区容量，必须大于 0
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 订阅此后发布的事件
    pub fn subscribe(&self) -> BoxStream<'static, DomainResult<SerializedEvent>> {
        BroadcastStream::new(self.tx.subscribe())
            .map(|r| r.map_err(|e| DomainError::publish(e.to_string())))
            .boxed()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: &SerializedEvent) -> DomainResult<()> {
        // 没有订阅者时 send 返回错误，视为非致命
        if self.tx.send(event.clone()).is_err() {
            tracing::trace!(event_id = event.event_id(), "no subscribers, event dropped");
        }
        Ok(())
    }
}

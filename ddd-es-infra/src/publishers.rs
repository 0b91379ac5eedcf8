use async_trait::async_trait;
use ddd_es_domain::error::DomainResult;
use ddd_es_domain::eventing::EventPublisher;
use ddd_es_domain::persist::SerializedEvent;
use std::sync::Arc;

/// 把每条事件写成一条结构化日志
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: &SerializedEvent) -> DomainResult<()> {
        tracing::info!(
            target: "ddd_es::events",
            event_id = event.event_id(),
            aggregate_type = event.aggregate_type(),
            "{event}"
        );
        Ok(())
    }
}

/// 依次交给多个发布器。
///
/// 某个发布器失败不会阻止其余发布器收到事件，返回第一个遇到的错误。
#[derive(Clone, Default)]
pub struct FanOutPublisher {
    publishers: Vec<Arc<dyn EventPublisher>>,
}

impl FanOutPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<P>(mut self, publisher: P) -> Self
    where
        P: EventPublisher + 'static,
    {
        self.publishers.push(Arc::new(publisher));
        self
    }

    pub fn len(&self) -> usize {
        self.publishers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty()
    }
}

#[async_trait]
impl EventPublisher for FanOutPublisher {
    async fn publish(&self, event: &SerializedEvent) -> DomainResult<()> {
        let mut first_error = None;
        for publisher in &self.publishers {
            if let Err(err) = publisher.publish(event).await {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

use async_trait::async_trait;
use dashmap::DashMap;
use ddd_es_domain::error::DomainResult;
use ddd_es_domain::eventing::EventPublisher;
use ddd_es_domain::persist::{EventStore, SerializedEvent};
use std::sync::Arc;
use tokio::sync::Mutex;

/// 发布装饰器：追加语义与被包装的存储完全一致，追加成功后按事件流顺序逐条发布
///
/// - 追加失败（包括并发冲突）时不发布任何事件；
/// - 单条发布失败只记录告警，不影响已完成的追加，也不阻止后续事件的发布；
/// - 同一事件流上“追加 + 发布”串行执行，发布顺序与事件流顺序一致，不同事件流互不等待。
pub struct PublishingEventStore<S, P> {
    inner: S,
    publisher: P,
    streams: DashMap<String, Arc<Mutex<()>>>,
}

impl<S, P> PublishingEventStore<S, P>
where
    S: EventStore,
    P: EventPublisher,
{
    pub fn new(inner: S, publisher: P) -> Self {
        Self {
            inner,
            publisher,
            streams: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    fn stream_lock(&self, stream_id: &str) -> Arc<Mutex<()>> {
        Arc::clone(self.streams.entry(stream_id.to_string()).or_default().value())
    }
}

#[async_trait]
impl<S, P> EventStore for PublishingEventStore<S, P>
where
    S: EventStore,
    P: EventPublisher,
{
    async fn append_events_to_stream(
        &self,
        stream_id: &str,
        events: &[SerializedEvent],
        expected_last_position: Option<usize>,
    ) -> DomainResult<()> {
        let lock = self.stream_lock(stream_id);
        let _guard = lock.lock().await;

        self.inner
            .append_events_to_stream(stream_id, events, expected_last_position)
            .await?;

        for event in events {
            if let Err(err) = self.publisher.publish(event).await {
                tracing::warn!(
                    stream_id,
                    event_id = event.event_id(),
                    event_type = event.event_type(),
                    error = %err,
                    "failed to publish appended event"
                );
            }
        }

        Ok(())
    }

    async fn get_stream(&self, stream_id: &str) -> DomainResult<Vec<SerializedEvent>> {
        self.inner.get_stream(stream_id).await
    }
}

use crate::error::DomainResult;
use crate::persist::SerializedEvent;
use async_trait::async_trait;
use std::sync::Arc;

/// 事件存储：以流标识为键、只追加的有序事件流集合
///
/// 实现必须满足：
/// - 同一事件流上的“检查位点 + 追加”是原子的，并发追加不会交错；
/// - 一次追加要么全部成功，要么不写入任何事件；
/// - `expected_last_position` 为 `Some(n)` 且当前流长度不等于 `n` 时返回
///   `ConcurrencyConflict`，为 `None` 时无条件追加；
/// - 读取从未创建的事件流返回 `NotFound`。
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn append_events_to_stream(
        &self,
        stream_id: &str,
        events: &[SerializedEvent],
        expected_last_position: Option<usize>,
    ) -> DomainResult<()>;

    /// 按追加顺序返回事件流的全部事件
    async fn get_stream(&self, stream_id: &str) -> DomainResult<Vec<SerializedEvent>>;
}

#[async_trait]
impl<T> EventStore for Arc<T>
where
    T: EventStore + ?Sized,
{
    async fn append_events_to_stream(
        &self,
        stream_id: &str,
        events: &[SerializedEvent],
        expected_last_position: Option<usize>,
    ) -> DomainResult<()> {
        (**self)
            .append_events_to_stream(stream_id, events, expected_last_position)
            .await
    }

    async fn get_stream(&self, stream_id: &str) -> DomainResult<Vec<SerializedEvent>> {
        (**self).get_stream(stream_id).await
    }
}

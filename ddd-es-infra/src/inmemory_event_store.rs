//! 内存版事件存储（InMemoryEventStore）
//!
//! 每条事件流持有独立的 `tokio::sync::Mutex`，“检查位点 + 追加”在该锁内完成；
//! 外层 `DashMap` 只在定位事件流句柄时短暂访问，不同事件流之间互不等待。
//!
//! 典型用途：测试环境、示例与本地开发。进程退出后数据不保留。

use async_trait::async_trait;
use dashmap::DashMap;
use ddd_es_domain::error::{DomainError, DomainResult};
use ddd_es_domain::persist::{EventStore, SerializedEvent};
use std::sync::Arc;
use tokio::sync::Mutex;

type Stream = Arc<Mutex<Vec<SerializedEvent>>>;

#[derive(Default)]
pub struct InMemoryEventStore {
    streams: DashMap<String, Stream>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 事件流当前长度（即最后一条事件的位点），事件流不存在时为 `None`
    pub async fn stream_position(&self, stream_id: &str) -> Option<usize> {
        let stream = self.stream(stream_id)?;
        let events = stream.lock().await;
        Some(events.len())
    }

    /// 已创建的事件流数量
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    // 取出句柄后立即释放分片锁，之后的等待只发生在事件流自身的锁上
    fn stream(&self, stream_id: &str) -> Option<Stream> {
        self.streams
            .get(stream_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn stream_or_create(&self, stream_id: &str) -> Stream {
        Arc::clone(self.streams.entry(stream_id.to_string()).or_default().value())
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    #[tracing::instrument(skip(self, events), fields(event_count = events.len()))]
    async fn append_events_to_stream(
        &self,
        stream_id: &str,
        events: &[SerializedEvent],
        expected_last_position: Option<usize>,
    ) -> DomainResult<()> {
        let stream = match self.stream(stream_id) {
            Some(stream) => stream,
            None => {
                // 冲突的追加与空追加都不应留下一条空事件流
                if let Some(expected) = expected_last_position.filter(|e| *e != 0) {
                    tracing::debug!(expected, "stream does not exist, rejecting append");
                    return Err(DomainError::concurrency_conflict(stream_id, expected, 0));
                }
                if events.is_empty() {
                    return Ok(());
                }
                self.stream_or_create(stream_id)
            }
        };

        let mut current = stream.lock().await;
        let actual = current.len();

        if let Some(expected) = expected_last_position {
            if expected != actual {
                tracing::debug!(expected, actual, "position mismatch, rejecting append");
                return Err(DomainError::concurrency_conflict(stream_id, expected, actual));
            }
        }

        current.extend_from_slice(events);
        tracing::debug!(position = current.len(), "events appended to stream");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_stream(&self, stream_id: &str) -> DomainResult<Vec<SerializedEvent>> {
        let stream = self
            .stream(stream_id)
            .ok_or_else(|| DomainError::not_found(format!("event stream {stream_id}")))?;

        let events = stream.lock().await.clone();
        tracing::trace!(events_loaded = events.len(), "loaded stream");
        Ok(events)
    }
}

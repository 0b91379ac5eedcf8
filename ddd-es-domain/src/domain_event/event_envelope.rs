use crate::aggregate::Aggregate;
use crate::domain_event::DomainEvent;
use crate::value_object::Version;
use chrono::Utc;
use std::fmt;
use ulid::Ulid;

use super::metadata::Metadata;

/// 事件信封：事件载荷 + 所属聚合标识 + 元数据。
///
/// 信封只在两处产生：聚合应用新事件时（此时分配聚合序号），
/// 以及从存储中反序列化历史事件时。创建后不再可变。
pub struct EventEnvelope<A>
where
    A: Aggregate,
{
    aggregate_id: A::Id,
    metadata: Metadata,
    payload: A::Event,
}

impl<A> EventEnvelope<A>
where
    A: Aggregate,
{
    pub(crate) fn new(aggregate_id: A::Id, aggregate_version: Version, payload: A::Event) -> Self {
        let metadata = Metadata::builder()
            .event_id(Ulid::new().to_string())
            .aggregate_type(A::TYPE.to_string())
            .aggregate_version(aggregate_version)
            .maybe_entity_id(payload.entity_id())
            .occurred_at(Utc::now())
            .build();

        Self {
            aggregate_id,
            metadata,
            payload,
        }
    }

    /// 由已持久化的各部分还原信封（供存储与反序列化使用）
    pub fn from_parts(aggregate_id: A::Id, metadata: Metadata, payload: A::Event) -> Self {
        Self {
            aggregate_id,
            metadata,
            payload,
        }
    }

    pub fn aggregate_id(&self) -> &A::Id {
        &self.aggregate_id
    }

    pub fn aggregate_version(&self) -> Version {
        self.metadata.aggregate_version()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.metadata.entity_id()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn payload(&self) -> &A::Event {
        &self.payload
    }

    pub fn into_payload(self) -> A::Event {
        self.payload
    }
}

// 手写实现，避免派生宏对聚合类型 `A` 本身追加 Clone/Debug/PartialEq 约束
impl<A> Clone for EventEnvelope<A>
where
    A: Aggregate,
{
    fn clone(&self) -> Self {
        Self {
            aggregate_id: self.aggregate_id.clone(),
            metadata: self.metadata.clone(),
            payload: self.payload.clone(),
        }
    }
}

impl<A> PartialEq for EventEnvelope<A>
where
    A: Aggregate,
{
    fn eq(&self, other: &Self) -> bool {
        self.aggregate_id == other.aggregate_id
            && self.metadata == other.metadata
            && self.payload == other.payload
    }
}

impl<A> fmt::Debug for EventEnvelope<A>
where
    A: Aggregate,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEnvelope")
            .field("aggregate_id", &self.aggregate_id)
            .field("metadata", &self.metadata)
            .field("payload", &self.payload)
            .finish()
    }
}

impl<A> fmt::Display for EventEnvelope<A>
where
    A: Aggregate,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [aggregate_id={}, version={}",
            self.payload.event_type(),
            self.aggregate_id,
            self.metadata.aggregate_version().value()
        )?;
        if let Some(entity_id) = self.metadata.entity_id() {
            write!(f, ", entity_id={entity_id}")?;
        }
        write!(f, "]")
    }
}

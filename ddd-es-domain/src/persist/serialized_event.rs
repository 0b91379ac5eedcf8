//! 事件持久化模型（SerializedEvent）
//!
//! 定义事件在存储层的标准形态，以及与 `EventEnvelope` 之间的转换：
//! 聚合标识以 `Display` 形式存储、以 `FromStr` 还原，载荷为 JSON。
//!
use crate::{
    aggregate::Aggregate,
    domain_event::{DomainEvent, EventEnvelope, Metadata},
    error::{DomainError, DomainResult},
    value_object::Version,
};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct SerializedEvent {
    /// 事件唯一标识符（ULID）
    event_id: String,
    /// 事件类型
    event_type: String,
    /// 载荷版本，仅作记录
    event_version: usize,
    /// 所属聚合标识（即事件流标识）
    aggregate_id: String,
    aggregate_type: String,
    /// 聚合序号，等于该事件在事件流中的位置（从 1 开始）
    aggregate_version: usize,
    /// 实体事件指向的子实体标识
    entity_id: Option<String>,
    occurred_at: DateTime<Utc>,
    payload: Value,
}

impl SerializedEvent {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn event_version(&self) -> usize {
        self.event_version
    }

    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn aggregate_version(&self) -> usize {
        self.aggregate_version
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

impl fmt::Display for SerializedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [aggregate_id={}, version={}",
            self.event_type, self.aggregate_id, self.aggregate_version
        )?;
        if let Some(entity_id) = &self.entity_id {
            write!(f, ", entity_id={entity_id}")?;
        }
        write!(f, "]")
    }
}

impl<A> TryFrom<&EventEnvelope<A>> for SerializedEvent
where
    A: Aggregate,
{
    type Error = DomainError;

    fn try_from(envelope: &EventEnvelope<A>) -> Result<Self, Self::Error> {
        let metadata = envelope.metadata();
        let payload = envelope.payload();

        Ok(SerializedEvent {
            event_id: metadata.event_id().to_string(),
            event_type: payload.event_type().to_string(),
            event_version: payload.event_version(),
            aggregate_id: envelope.aggregate_id().to_string(),
            aggregate_type: metadata.aggregate_type().to_string(),
            aggregate_version: metadata.aggregate_version().value(),
            entity_id: metadata.entity_id().map(str::to_string),
            occurred_at: *metadata.occurred_at(),
            payload: serde_json::to_value(payload)?,
        })
    }
}

impl<A> TryFrom<&SerializedEvent> for EventEnvelope<A>
where
    A: Aggregate,
{
    type Error = DomainError;

    fn try_from(value: &SerializedEvent) -> Result<Self, Self::Error> {
        if value.aggregate_type != A::TYPE {
            return Err(DomainError::TypeMismatch {
                expected: A::TYPE.to_string(),
                found: value.aggregate_type.clone(),
            });
        }

        let aggregate_id = value
            .aggregate_id
            .parse::<A::Id>()
            .map_err(|e| DomainError::Parse {
                reason: format!("invalid {} id {:?}: {e}", A::TYPE, value.aggregate_id),
            })?;

        let payload: A::Event = serde_json::from_value(value.payload.clone())?;

        let metadata = Metadata::builder()
            .event_id(value.event_id.clone())
            .aggregate_type(value.aggregate_type.clone())
            .aggregate_version(Version::from_value(value.aggregate_version))
            .maybe_entity_id(value.entity_id.clone())
            .occurred_at(value.occurred_at)
            .build();

        Ok(EventEnvelope::from_parts(aggregate_id, metadata, payload))
    }
}

pub fn serialize_events<A>(events: &[EventEnvelope<A>]) -> DomainResult<Vec<SerializedEvent>>
where
    A: Aggregate,
{
    events.iter().map(SerializedEvent::try_from).collect()
}

/// 将存储中的事件还原为聚合 `A` 的事件信封，保持原有顺序
pub fn deserialize_events<A>(events: Vec<SerializedEvent>) -> DomainResult<Vec<EventEnvelope<A>>>
where
    A: Aggregate,
{
    events.iter().map(EventEnvelope::try_from).collect()
}

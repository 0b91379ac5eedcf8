use crate::value_object::Version;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 事件元数据，在事件被聚合应用时确定，此后不可变
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    event_id: String,
    aggregate_type: String,
    /// 聚合序号：该事件被应用后聚合所处的版本
    aggregate_version: Version,
    entity_id: Option<String>,
    occurred_at: DateTime<Utc>,
}

impl Metadata {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn aggregate_version(&self) -> Version {
        self.aggregate_version
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn occurred_at(&self) -> &DateTime<Utc> {
        &self.occurred_at
    }
}

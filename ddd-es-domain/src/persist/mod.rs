//! 持久化协议（persist）
//!
//! - `EventStore`：按事件流追加/读取序列化事件，带乐观并发检查；
//! - `Repository`：以聚合为单位的加载（重放）与保存；
//! - `SerializedEvent`：事件在存储层的形态，及其与 `EventEnvelope` 的批量转换。
//!
//! 本模块只定义契约，具体后端（内存实现等）由 `ddd-es-infra` 或上层提供并注入。
//!
mod event_store;
mod repository;
mod serialized_event;

pub use event_store::EventStore;
pub use repository::Repository;
pub use serialized_event::{SerializedEvent, deserialize_events, serialize_events};

//! ddd-es 参考基础设施
//!
//! - `InMemoryEventStore`：按事件流加锁的内存事件存储；
//! - `PublishingEventStore`：追加成功后逐条发布事件的存储装饰器；
//! - `EventSourcedRepository`：基于任意 `EventStore` 的事件溯源仓储；
//! - `InMemoryEventBus`、`TracingEventPublisher`、`FanOutPublisher`：事件发布器实现。
//!
mod event_sourced_repository;
mod inmemory_event_bus;
mod inmemory_event_store;
mod publishers;
mod publishing_event_store;

pub use event_sourced_repository::EventSourcedRepository;
pub use inmemory_event_bus::InMemoryEventBus;
pub use inmemory_event_store::InMemoryEventStore;
pub use publishers::{FanOutPublisher, TracingEventPublisher};
pub use publishing_event_store::PublishingEventStore;

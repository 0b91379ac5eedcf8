//! 领域事件（Domain Event）
//!
//! 定义事件载荷需要实现的最小接口（`DomainEvent`），以及运行时在应用事件时
//! 为其附加聚合标识与序号后形成的不可变 `EventEnvelope`。

mod domain_event_trait;
mod event_envelope;
mod metadata;

pub use domain_event_trait::DomainEvent;
pub use event_envelope::EventEnvelope;
pub use metadata::Metadata;

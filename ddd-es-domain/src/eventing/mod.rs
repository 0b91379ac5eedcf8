//! 事件发布（eventing）
//!
//! 事件成功追加到事件存储之后，由装饰器逐条交给 `EventPublisher`；
//! 发布对存储而言是“发出即忘”：发布失败不会撤销已完成的追加。
//!
mod publisher;

pub use publisher::EventPublisher;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// 领域事件载荷需要满足的通用能力边界
///
/// 每个聚合的事件是一个封闭的枚举，通常由 `#[domain_event]` 宏生成本实现。
pub trait DomainEvent:
    Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// 事件类型（形如 `ProductEvent.Created` 或自定义类型名）
    fn event_type(&self) -> &'static str;

    /// 事件载荷版本
    fn event_version(&self) -> usize;

    /// 实体事件指向的子实体标识，聚合级事件返回 `None`
    fn entity_id(&self) -> Option<String> {
        None
    }
}

//! 标识与实体（Entity）
//!
//! - `Identifier`：聚合/实体标识需要满足的值语义（相等、哈希、有序、可显示、可解析）；
//! - `Entity`：由聚合独占持有的子实体，仅能通过聚合的事件处理逻辑修改；
//! - `NoEntity`：不包含子实体的聚合使用的占位类型。
//!
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// 标识值类型
///
/// 存储层以 `Display` 形式作为事件流的键，重建时以 `FromStr` 还原。
pub trait Identifier:
    Clone + Eq + Ord + Hash + Debug + Display + FromStr<Err: Display> + Send + Sync + 'static
{
}

impl<T> Identifier for T where
    T: Clone + Eq + Ord + Hash + Debug + Display + FromStr<Err: Display> + Send + Sync + 'static
{
}

/// 聚合内部的子实体，标识在所属聚合内唯一
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Identifier;

    fn id(&self) -> &Self::Id;
}

/// 没有子实体的聚合使用的实体类型（不可构造）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoEntity {}

impl Entity for NoEntity {
    type Id = String;

    fn id(&self) -> &Self::Id {
        match *self {}
    }
}

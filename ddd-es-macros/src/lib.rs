//! ddd-es 过程宏
//!
//! - `#[entity]`：聚合内子实体，注入 `id` 字段并实现 `Entity`；
//! - `#[entity_id]`：单字段元组结构体形式的标识类型；
//! - `#[domain_event]`：聚合的封闭事件枚举，实现 `DomainEvent`。
//!
//! 生成代码通过 `::ddd_es_domain` 路径引用运行时类型。
//!
use proc_macro::TokenStream;

mod derives;
mod domain_event;
mod entity;
mod entity_id;

/// 子实体宏
///
/// 参数：`#[entity(id = IdType, debug = true|false)]`，`id` 默认 `String`。
/// 注入的 `id` 字段为私有，模块外只能通过 `Entity::id` 读取。
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 标识类型宏，仅用于 `struct X(Inner);`
///
/// 参数：`#[entity_id(debug = true|false)]`。
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 领域事件枚举宏
///
/// 参数：`#[domain_event(version = N)]`，默认载荷版本为 1。
/// 变体可覆写 `#[event(event_type = "...", event_version = N)]`；
/// 字段上的 `#[event(entity_id)]` 把该变体标记为实体事件。
#[proc_macro_attribute]
pub fn domain_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    domain_event::expand(attr, item)
}

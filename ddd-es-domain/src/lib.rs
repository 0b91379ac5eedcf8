//! 事件溯源聚合运行时（ddd-es-domain）
//!
//! 以不可变事件的有序历史重建可变的领域状态，并提供：
//! - 聚合（`aggregate`）与聚合根状态（`aggregate_root`）：身份、版本、子实体与待提交变更；
//! - 领域事件（`domain_event`）：封闭的事件枚举、事件信封与元数据；
//! - 实体（`entity`）与值对象（`value_object`）；
//! - 持久化协议（`persist`）：事件存储、仓储与事件的序列化形态；
//! - 事件发布协议（`eventing`）。
//!
//! 本 crate 只定义存储后端必须满足的契约，不绑定具体的存储介质；
//! 参考实现（内存存储、发布装饰器、事件溯源仓储）见 `ddd-es-infra`。
//!
//! 典型用法：
//! 1. 用 `#[domain_event]` 定义聚合的封闭事件枚举，用 `#[entity]` 定义子实体；
//! 2. 在聚合类型中嵌入 `AggregateRoot<Self>` 并实现 `Aggregate::apply`（穷举匹配）；
//! 3. 领域操作先校验输入，再通过 `raise_change` 产生事件；
//! 4. 由 `persist::Repository` 负责加载（重放）与保存（乐观并发追加）。
//!
pub mod aggregate;
pub mod aggregate_root;
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod eventing;
pub mod persist;
pub mod value_object;

// 允许在本 crate 内部通过 ::ddd_es_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::ddd_es_domain 路径。
extern crate self as ddd_es_domain;

//! 示例领域：产品与待办项
//!
//! 两个聚合之间只通过标识引用：产品记录已规划待办项的标识与位置，
//! 待办项记录所属产品的标识。
//!
pub mod backlog_item;
pub mod product;
mod text;

pub use backlog_item::{BacklogItem, BacklogItemEvent, BacklogItemId, BacklogItemRepository, StoryPoints};
pub use product::{Product, ProductBacklogItem, ProductEvent, ProductId, ProductRepository};

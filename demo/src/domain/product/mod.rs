//! 产品聚合（Product）
//!
//! 产品拥有名称与一组已规划的待办项（`ProductBacklogItem`），
//! 待办项在产品内的位置构成待办列表的顺序。
//!
mod backlog;
mod events;

pub use backlog::ProductBacklogItem;
pub use events::ProductEvent;

use crate::domain::backlog_item::{BacklogItem, BacklogItemId};
use crate::domain::text::NonBlank;
use ddd_es_domain::aggregate::Aggregate;
use ddd_es_domain::aggregate_root::AggregateRoot;
use ddd_es_domain::domain_event::EventEnvelope;
use ddd_es_domain::entity::Entity;
use ddd_es_domain::error::{DomainError, DomainResult};
use ddd_es_infra::EventSourcedRepository;
use ddd_es_macros::entity_id;
use std::collections::BTreeSet;

#[entity_id]
pub struct ProductId(String);

impl ProductId {
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

pub type ProductRepository<S> = EventSourcedRepository<Product, S>;

#[derive(Debug, Clone, Default)]
pub struct Product {
    root: AggregateRoot<Product>,
    name: String,
}

impl Aggregate for Product {
    const TYPE: &'static str = "product";
    type Id = ProductId;
    type Event = ProductEvent;
    type Entity = ProductBacklogItem;

    fn root(&self) -> &AggregateRoot<Self> {
        &self.root
    }

    fn root_mut(&mut self) -> &mut AggregateRoot<Self> {
        &mut self.root
    }

    fn apply(&mut self, event: &EventEnvelope<Self>) {
        match event.payload() {
            ProductEvent::Created { name } | ProductEvent::Renamed { name } => {
                self.name = name.clone();
            }
            ProductEvent::BacklogItemPlanned {
                backlog_item_id,
                position,
            } => {
                let item = ProductBacklogItem::new(backlog_item_id.clone(), *position);
                if let Err(err) = self.root.add_entity(item, true) {
                    tracing::warn!(product_id = ?self.root.id(), %err, "backlog item planned twice");
                }
            }
            ProductEvent::BacklogItemPositionChanged {
                backlog_item_id,
                position,
            } => {
                let moved = self
                    .root
                    .update_entity(backlog_item_id, |item| item.set_position(*position));
                if let Err(err) = moved {
                    tracing::warn!(
                        product_id = ?self.root.id(),
                        %backlog_item_id,
                        %err,
                        "position changed for a backlog item that is not planned"
                    );
                }
            }
        }
    }
}

impl Product {
    pub fn create(id: ProductId, name: &str) -> DomainResult<Self> {
        NonBlank::parse("id", &id.to_string())?;
        let name = NonBlank::parse("name", name)?.into_inner();

        let mut product = Self::default();
        product.raise_change_for(id, ProductEvent::Created { name })?;
        Ok(product)
    }

    /// 以随机生成的标识创建产品
    pub fn create_named(name: &str) -> DomainResult<Self> {
        Self::create(ProductId::generate(), name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, new_name: &str) -> DomainResult<()> {
        let name = NonBlank::parse("new name", new_name)?.into_inner();
        if self.name != name {
            self.raise_change(ProductEvent::Renamed { name })?;
        }
        Ok(())
    }

    /// 把待办项排到待办列表末尾
    pub fn plan_backlog_item(&mut self, backlog_item: &BacklogItem) -> DomainResult<()> {
        let backlog_item_id = backlog_item.id().cloned().ok_or_else(|| {
            DomainError::validation("backlog item must be created before it is planned")
        })?;

        if backlog_item.product_id() != self.id() {
            return Err(DomainError::validation(format!(
                "backlog item \"{}\" belongs to another product",
                backlog_item.title()
            )));
        }

        if self.root.entity_exists(&backlog_item_id) {
            return Err(DomainError::validation(format!(
                "backlog item \"{}\" is already planned",
                backlog_item.title()
            )));
        }

        let position = self.root.entity_count();
        self.raise_change(ProductEvent::BacklogItemPlanned {
            backlog_item_id,
            position,
        })
    }

    /// 按给定顺序重排待办列表，只为位置发生变化的待办项产生事件。
    ///
    /// `ordered_ids` 必须恰好包含全部已规划的待办项，否则不产生任何事件。
    pub fn reorder_backlog_items(&mut self, ordered_ids: &[BacklogItemId]) -> DomainResult<()> {
        if ordered_ids.len() != self.root.entity_count() {
            return Err(DomainError::validation(format!(
                "expected {} backlog items to reorder, got {}",
                self.root.entity_count(),
                ordered_ids.len()
            )));
        }

        let mut seen = BTreeSet::new();
        for id in ordered_ids {
            if !self.root.entity_exists(id) {
                return Err(DomainError::validation(format!(
                    "backlog item not found: {id}"
                )));
            }
            if !seen.insert(id) {
                return Err(DomainError::validation(format!(
                    "backlog item listed twice: {id}"
                )));
            }
        }

        let moves: Vec<(BacklogItemId, usize)> = self
            .planned_backlog_items()
            .into_iter()
            .filter_map(|item| {
                let position = ordered_ids.iter().position(|id| id == item.id())?;
                (position != item.position()).then(|| (item.id().clone(), position))
            })
            .collect();

        for (backlog_item_id, position) in moves {
            self.raise_change(ProductEvent::BacklogItemPositionChanged {
                backlog_item_id,
                position,
            })?;
        }
        Ok(())
    }

    /// 按位置排序的已规划待办项
    pub fn planned_backlog_items(&self) -> Vec<&ProductBacklogItem> {
        let mut items: Vec<&ProductBacklogItem> = self.root.entities().collect();
        items.sort_by_key(|item| item.position());
        items
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

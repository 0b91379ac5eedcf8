//! 待办项聚合（BacklogItem）
//!
mod events;
mod story_points;

pub use events::BacklogItemEvent;
pub use story_points::StoryPoints;

use crate::domain::product::{Product, ProductId};
use crate::domain::text::NonBlank;
use ddd_es_domain::aggregate::Aggregate;
use ddd_es_domain::aggregate_root::AggregateRoot;
use ddd_es_domain::domain_event::EventEnvelope;
use ddd_es_domain::entity::NoEntity;
use ddd_es_domain::error::{DomainError, DomainResult};
use ddd_es_infra::EventSourcedRepository;
use ddd_es_macros::entity_id;

#[entity_id]
pub struct BacklogItemId(String);

impl BacklogItemId {
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

pub type BacklogItemRepository<S> = EventSourcedRepository<BacklogItem, S>;

#[derive(Debug, Clone, Default)]
pub struct BacklogItem {
    root: AggregateRoot<BacklogItem>,
    title: String,
    story_points: StoryPoints,
    product_id: Option<ProductId>,
}

impl Aggregate for BacklogItem {
    const TYPE: &'static str = "backlog_item";
    type Id = BacklogItemId;
    type Event = BacklogItemEvent;
    type Entity = NoEntity;

    fn root(&self) -> &AggregateRoot<Self> {
        &self.root
    }

    fn root_mut(&mut self) -> &mut AggregateRoot<Self> {
        &mut self.root
    }

    fn apply(&mut self, event: &EventEnvelope<Self>) {
        match event.payload() {
            BacklogItemEvent::Created {
                title,
                story_points,
                product_id,
            } => {
                self.title = title.clone();
                self.story_points = *story_points;
                self.product_id = Some(product_id.clone());
            }
            BacklogItemEvent::TitleChanged { title } => self.title = title.clone(),
            BacklogItemEvent::StoryPointsAssigned { story_points } => {
                self.story_points = *story_points;
            }
        }
    }
}

impl BacklogItem {
    pub fn create(id: BacklogItemId, title: &str, product: &Product) -> DomainResult<Self> {
        Self::create_with_story_points(id, title, StoryPoints::Zero, product)
    }

    /// 以随机生成的标识创建待办项
    pub fn create_titled(title: &str, product: &Product) -> DomainResult<Self> {
        Self::create(BacklogItemId::generate(), title, product)
    }

    pub fn create_with_story_points(
        id: BacklogItemId,
        title: &str,
        story_points: StoryPoints,
        product: &Product,
    ) -> DomainResult<Self> {
        NonBlank::parse("id", &id.to_string())?;
        let title = NonBlank::parse("title", title)?.into_inner();
        let product_id = product
            .id()
            .cloned()
            .ok_or_else(|| DomainError::validation("product must be created first"))?;

        let mut item = Self::default();
        item.raise_change_for(
            id,
            BacklogItemEvent::Created {
                title,
                story_points,
                product_id,
            },
        )?;
        Ok(item)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn story_points(&self) -> StoryPoints {
        self.story_points
    }

    /// 所属产品，聚合创建之前为 `None`
    pub fn product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }

    pub fn change_title(&mut self, title: &str) -> DomainResult<()> {
        let title = NonBlank::parse("title", title)?.into_inner();
        if self.title != title {
            self.raise_change(BacklogItemEvent::TitleChanged { title })?;
        }
        Ok(())
    }

    pub fn assign_story_points(&mut self, story_points: StoryPoints) -> DomainResult<()> {
        if self.story_points != story_points {
            self.raise_change(BacklogItemEvent::StoryPointsAssigned { story_points })?;
        }
        Ok(())
    }
}

impl PartialEq for BacklogItem {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

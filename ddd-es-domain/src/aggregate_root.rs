//! 聚合根状态（AggregateRoot）
//!
//! 每个聚合内嵌一个 `AggregateRoot<Self>`，由它持有：
//! - 标识：在第一条被应用（或重放）的事件时确定，此后不变；
//! - 版本：等于迄今应用过的事件总数；
//! - 子实体：以实体标识为键的映射，标识在聚合内唯一；
//! - 待提交变更：已产生但尚未持久化的事件。
//!
//! 版本与待提交变更只由 `Aggregate` 的事件流程推进；
//! 子实体的增删改只应出现在聚合的事件处理逻辑中。
//!
use crate::aggregate::Aggregate;
use crate::domain_event::EventEnvelope;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::value_object::Version;
use std::collections::BTreeMap;
use std::fmt;

/// 聚合 `A` 的子实体标识类型
pub type EntityIdOf<A> = <<A as Aggregate>::Entity as Entity>::Id;

pub struct AggregateRoot<A>
where
    A: Aggregate,
{
    id: Option<A::Id>,
    version: Version,
    entities: BTreeMap<EntityIdOf<A>, A::Entity>,
    pending_changes: Vec<EventEnvelope<A>>,
}

impl<A> AggregateRoot<A>
where
    A: Aggregate,
{
    /// 空白、尚无标识的聚合根
    pub fn new() -> Self {
        Self {
            id: None,
            version: Version::new(),
            entities: BTreeMap::new(),
            pending_changes: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<&A::Id> {
        self.id.as_ref()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn pending_changes(&self) -> &[EventEnvelope<A>] {
        &self.pending_changes
    }

    // ---- 事件流程（仅由 Aggregate 的默认方法驱动） ----

    /// 首次应用事件时确定标识；已有标识时保持不变
    pub(crate) fn adopt_identity(&mut self, aggregate_id: &A::Id) {
        if self.id.is_none() {
            self.id = Some(aggregate_id.clone());
        }
    }

    pub(crate) fn advance_version(&mut self) {
        self.version = self.version.next();
    }

    pub(crate) fn record(&mut self, event: EventEnvelope<A>) {
        self.pending_changes.push(event);
        self.advance_version();
    }

    pub(crate) fn clear_pending_changes(&mut self) {
        self.pending_changes.clear();
    }

    // ---- 子实体管理 ----

    /// 添加子实体。
    ///
    /// 标识已存在时：`throw_if_exists` 为真返回 `EntityAlreadyExists`，否则静默忽略。
    /// 无论哪种情况都不会出现两个标识相同的实体。
    pub fn add_entity(&mut self, entity: A::Entity, throw_if_exists: bool) -> DomainResult<()> {
        if self.entities.contains_key(entity.id()) {
            if throw_if_exists {
                return Err(DomainError::EntityAlreadyExists {
                    entity_id: entity.id().to_string(),
                });
            }
            return Ok(());
        }

        self.entities.insert(entity.id().clone(), entity);
        Ok(())
    }

    /// 按标识移除子实体，返回被移除的实体。
    ///
    /// 标识不存在时：`throw_if_missing` 为真返回 `EntityNotFound`，否则返回 `Ok(None)`。
    pub fn remove_entity(
        &mut self,
        entity_id: &EntityIdOf<A>,
        throw_if_missing: bool,
    ) -> DomainResult<Option<A::Entity>> {
        match self.entities.remove(entity_id) {
            Some(entity) => Ok(Some(entity)),
            None if throw_if_missing => Err(DomainError::EntityNotFound {
                entity_id: entity_id.to_string(),
            }),
            None => Ok(None),
        }
    }

    /// 移除与给定实体标识相同的子实体，不存在时静默忽略
    pub fn remove_entity_of(&mut self, entity: &A::Entity) -> Option<A::Entity> {
        self.entities.remove(entity.id())
    }

    pub fn find_entity(&self, entity_id: &EntityIdOf<A>) -> Option<&A::Entity> {
        self.entities.get(entity_id)
    }

    /// 供事件处理逻辑修改子实体，返回闭包的结果。
    ///
    /// 实体不存在时返回 `EntityNotFound`；闭包改动了实体标识时撤销本次修改并返回 `InvalidState`。
    pub fn update_entity<F, R>(&mut self, entity_id: &EntityIdOf<A>, f: F) -> DomainResult<R>
    where
        F: FnOnce(&mut A::Entity) -> R,
    {
        let entity = self
            .entities
            .get_mut(entity_id)
            .ok_or_else(|| DomainError::EntityNotFound {
                entity_id: entity_id.to_string(),
            })?;

        let before = entity.clone();
        let result = f(entity);
        if entity.id() != entity_id {
            *entity = before;
            return Err(DomainError::invalid_state(format!(
                "entity {entity_id} must keep its identity"
            )));
        }
        Ok(result)
    }

    pub fn entity_exists(&self, entity_id: &EntityIdOf<A>) -> bool {
        self.entities.contains_key(entity_id)
    }

    /// 按实体标识顺序遍历全部子实体
    pub fn entities(&self) -> impl Iterator<Item = &A::Entity> {
        self.entities.values()
    }

    /// 返回满足条件的子实体（只读视图）
    pub fn query_entities<P>(&self, mut predicate: P) -> Vec<&A::Entity>
    where
        P: FnMut(&A::Entity) -> bool,
    {
        self.entities
            .values()
            .filter(|entity| predicate(entity))
            .collect()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

impl<A> Default for AggregateRoot<A>
where
    A: Aggregate,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for AggregateRoot<A>
where
    A: Aggregate,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            version: self.version,
            entities: self.entities.clone(),
            pending_changes: self.pending_changes.clone(),
        }
    }
}

/// 两个聚合根相等当且仅当标识与版本都相同
impl<A> PartialEq for AggregateRoot<A>
where
    A: Aggregate,
{
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.version == other.version
    }
}

impl<A> Eq for AggregateRoot<A> where A: Aggregate {}

impl<A> fmt::Debug for AggregateRoot<A>
where
    A: Aggregate,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateRoot")
            .field("type", &A::TYPE)
            .field("id", &self.id)
            .field("version", &self.version)
            .field("entities", &self.entities)
            .field("pending_changes", &self.pending_changes.len())
            .finish()
    }
}

//! 事件溯源仓储（EventSourcedRepository）
//!
//! 组合一个聚合工厂与一个事件存储：
//! - 加载：读取以聚合标识为键的事件流，校验归属与序号后交给新建聚合重放；
//! - 保存：序列化待提交变更，以期望版本作为位点追加，成功后标记为已提交。
//!
use async_trait::async_trait;
use ddd_es_domain::aggregate::Aggregate;
use ddd_es_domain::domain_event::EventEnvelope;
use ddd_es_domain::error::{DomainError, DomainResult};
use ddd_es_domain::persist::{EventStore, Repository, deserialize_events, serialize_events};
use ddd_es_domain::value_object::Version;
use std::sync::Arc;

type Factory<A> = Arc<dyn Fn() -> A + Send + Sync>;

pub struct EventSourcedRepository<A, S> {
    store: S,
    factory: Factory<A>,
}

impl<A, S> EventSourcedRepository<A, S>
where
    A: Aggregate + Default,
    S: EventStore,
{
    /// 使用 `A::default()` 作为空白聚合
    pub fn new(store: S) -> Self {
        Self::with_factory(store, A::default)
    }
}

impl<A, S> EventSourcedRepository<A, S>
where
    A: Aggregate,
    S: EventStore,
{
    /// 使用自定义工厂创建空白聚合，每次加载调用一次
    pub fn with_factory<F>(store: S, factory: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        Self {
            store,
            factory: Arc::new(factory),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<A, S> Clone for EventSourcedRepository<A, S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

#[async_trait]
impl<A, S> Repository<A> for EventSourcedRepository<A, S>
where
    A: Aggregate,
    S: EventStore,
{
    #[tracing::instrument(skip_all, fields(aggregate_type = A::TYPE, aggregate_id = %aggregate_id))]
    async fn get_by_id(&self, aggregate_id: &A::Id) -> DomainResult<A> {
        let not_found = || DomainError::not_found(format!("{} {aggregate_id}", A::TYPE));

        let events = match self.store.get_stream(&aggregate_id.to_string()).await {
            Ok(events) if events.is_empty() => return Err(not_found()),
            Ok(events) => events,
            Err(err) if err.is_not_found() => return Err(not_found()),
            Err(err) => return Err(err),
        };

        let history = deserialize_events::<A>(events)?;
        verify_history(aggregate_id, &history)?;

        let mut aggregate = (self.factory)();
        aggregate.load_from_history(history);

        tracing::debug!(version = %aggregate.version(), "aggregate loaded");
        Ok(aggregate)
    }

    #[tracing::instrument(skip_all, fields(aggregate_type = A::TYPE, expected = ?expected_version))]
    async fn save_with_expected_version(
        &self,
        aggregate: &mut A,
        expected_version: Option<Version>,
    ) -> DomainResult<()> {
        let stream_id = aggregate
            .id()
            .map(ToString::to_string)
            .ok_or_else(|| {
                DomainError::invalid_state(format!("cannot save a {} without identity", A::TYPE))
            })?;

        let events = serialize_events(aggregate.pending_changes())?;

        self.store
            .append_events_to_stream(&stream_id, &events, expected_version.map(|v| v.value()))
            .await?;

        aggregate.mark_pending_changes_as_committed();

        tracing::debug!(
            aggregate_id = %stream_id,
            saved = events.len(),
            version = %aggregate.version(),
            "aggregate saved"
        );
        Ok(())
    }
}

// 重放与实时应用须一致：每条事件属于所请求的聚合，且聚合序号从 1 起连续
fn verify_history<A>(aggregate_id: &A::Id, history: &[EventEnvelope<A>]) -> DomainResult<()>
where
    A: Aggregate,
{
    for (index, event) in history.iter().enumerate() {
        if event.aggregate_id() != aggregate_id {
            return Err(DomainError::invalid_state(format!(
                "stream of {} {aggregate_id} holds an event of {}",
                A::TYPE,
                event.aggregate_id()
            )));
        }

        let expected = Version::from_value(index + 1);
        if event.aggregate_version() != expected {
            return Err(DomainError::invalid_state(format!(
                "stream of {} {aggregate_id} has version {} at position {expected}",
                A::TYPE,
                event.aggregate_version()
            )));
        }
    }
    Ok(())
}

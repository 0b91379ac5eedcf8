#![allow(dead_code)]

use ddd_es_domain::aggregate::Aggregate;
use ddd_es_domain::aggregate_root::AggregateRoot;
use ddd_es_domain::domain_event::EventEnvelope;
use ddd_es_domain::entity::NoEntity;
use ddd_es_domain::error::{DomainError, DomainResult};
use ddd_es_domain::eventing::EventPublisher;
use ddd_es_domain::persist::SerializedEvent;
use ddd_es_macros::{domain_event, entity_id};
use std::sync::Mutex;

#[entity_id]
pub struct AccountId(String);

#[domain_event]
pub enum AccountEvent {
    Opened { owner: String },
    Deposited { amount: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct Account {
    root: AggregateRoot<Account>,
    pub owner: String,
    pub balance: u64,
}

impl Aggregate for Account {
    const TYPE: &'static str = "account";
    type Id = AccountId;
    type Event = AccountEvent;
    type Entity = NoEntity;

    fn root(&self) -> &AggregateRoot<Self> {
        &self.root
    }

    fn root_mut(&mut self) -> &mut AggregateRoot<Self> {
        &mut self.root
    }

    fn apply(&mut self, event: &EventEnvelope<Self>) {
        match event.payload() {
            AccountEvent::Opened { owner } => self.owner = owner.clone(),
            AccountEvent::Deposited { amount } => self.balance += amount,
        }
    }
}

impl Account {
    pub fn open(id: &str, owner: &str) -> DomainResult<Self> {
        let mut account = Self::default();
        account.raise_change_for(
            AccountId::new(id.to_string()),
            AccountEvent::Opened {
                owner: owner.to_string(),
            },
        )?;
        Ok(account)
    }

    pub fn deposit(&mut self, amount: u64) -> DomainResult<()> {
        if amount == 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        self.raise_change(AccountEvent::Deposited { amount })
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

/// 按收到的顺序记录事件
#[derive(Default)]
pub struct RecordingPublisher {
    seen: Mutex<Vec<SerializedEvent>>,
}

impl RecordingPublisher {
    /// 事件的 `Display` 形式
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(ToString::to_string).collect()
    }

    pub fn event_ids(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_id().to_string())
            .collect()
    }
}

#[async_trait::async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: &SerializedEvent) -> DomainResult<()> {
        self.seen.lock().unwrap().push(event.clone());
        // 让出执行权，放大并发追加之间的交错
        tokio::task::yield_now().await;
        Ok(())
    }
}

/// 每条事件都发布失败
pub struct FailingPublisher;

#[async_trait::async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, event: &SerializedEvent) -> DomainResult<()> {
        Err(DomainError::publish(format!("broker down for {}", event.event_id())))
    }
}

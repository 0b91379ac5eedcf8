mod common;

use common::Account;
use ddd_es_domain::aggregate::Aggregate;
use ddd_es_domain::error::DomainError;
use ddd_es_domain::persist::{EventStore, SerializedEvent, serialize_events};
use ddd_es_infra::InMemoryEventStore;
use std::sync::Arc;

fn opened_with_deposits(id: &str, deposits: &[u64]) -> Vec<SerializedEvent> {
    let mut account = Account::open(id, "amy").unwrap();
    for amount in deposits {
        account.deposit(*amount).unwrap();
    }
    serialize_events(account.pending_changes()).unwrap()
}

#[tokio::test]
async fn unknown_stream_is_not_found() {
    let store = InMemoryEventStore::new();
    let err = store.get_stream("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn append_then_read_preserves_order() -> anyhow::Result<()> {
    let store = InMemoryEventStore::new();
    let events = opened_with_deposits("a-1", &[10, 20]);

    store.append_events_to_stream("a-1", &events, None).await?;

    let read = store.get_stream("a-1").await?;
    assert_eq!(read, events);
    let positions: Vec<usize> = read.iter().map(|e| e.aggregate_version()).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn expected_position_must_equal_stream_length() -> anyhow::Result<()> {
    let store = InMemoryEventStore::new();
    let events = opened_with_deposits("a-1", &[10]);

    store.append_events_to_stream("a-1", &events, Some(0)).await?;

    // 位点过旧
    let err = store
        .append_events_to_stream("a-1", &events[..1], Some(1))
        .await
        .unwrap_err();
    match err {
        DomainError::ConcurrencyConflict {
            stream_id,
            expected,
            actual,
        } => {
            assert_eq!(stream_id, "a-1");
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected {other:?}"),
    }

    // 冲突的追加不写入任何事件
    assert_eq!(store.get_stream("a-1").await?.len(), 2);

    store.append_events_to_stream("a-1", &events[..1], Some(2)).await?;
    assert_eq!(store.stream_position("a-1").await, Some(3));
    Ok(())
}

#[tokio::test]
async fn unconditional_append_skips_the_check() -> anyhow::Result<()> {
    let store = InMemoryEventStore::new();
    let events = opened_with_deposits("a-1", &[]);

    store.append_events_to_stream("a-1", &events, None).await?;
    store.append_events_to_stream("a-1", &events, None).await?;
    assert_eq!(store.stream_position("a-1").await, Some(2));
    Ok(())
}

#[tokio::test]
async fn streams_are_independent() -> anyhow::Result<()> {
    let store = InMemoryEventStore::new();

    store
        .append_events_to_stream("a-1", &opened_with_deposits("a-1", &[5]), Some(0))
        .await?;
    store
        .append_events_to_stream("a-2", &opened_with_deposits("a-2", &[]), Some(0))
        .await?;

    assert_eq!(store.stream_count(), 2);
    assert_eq!(store.stream_position("a-1").await, Some(2));
    assert_eq!(store.stream_position("a-2").await, Some(1));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_appends_with_the_same_position_admit_exactly_one() {
    let store = Arc::new(InMemoryEventStore::new());
    let events = Arc::new(opened_with_deposits("race", &[1]));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            let events = Arc::clone(&events);
            tokio::spawn(async move {
                store
                    .append_events_to_stream("race", &events, Some(0))
                    .await
            })
        })
        .collect();

    let mut won = 0;
    let mut conflicts = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) => won += 1,
            Err(err) if err.is_concurrency_conflict() => conflicts += 1,
            Err(other) => panic!("unexpected {other:?}"),
        }
    }

    assert_eq!(won, 1);
    assert_eq!(conflicts, 15);
    // 不会出现交错的事件
    assert_eq!(store.get_stream("race").await.unwrap(), *events);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn unconditional_appends_never_interleave() {
    let store = Arc::new(InMemoryEventStore::new());

    let tasks: Vec<_> = (0..8u64)
        .map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let batch = opened_with_deposits("shared", &[n + 1, n + 1]);
                store.append_events_to_stream("shared", &batch, None).await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stream = store.get_stream("shared").await.unwrap();
    assert_eq!(stream.len(), 24);
    // 每个批次的三条事件保持相邻
    for batch in stream.chunks(3) {
        assert_eq!(batch[0].event_type(), "AccountEvent.Opened");
        assert_eq!(batch[1].payload(), batch[2].payload());
    }
}

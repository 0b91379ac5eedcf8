//! 聚合（Aggregate）抽象
//!
//! 聚合由两部分组成：
//! - 内嵌的 `AggregateRoot<Self>`：标识、版本、子实体与待提交变更；
//! - `apply`：对本聚合封闭事件枚举的穷举匹配，是唯一改变状态的入口。
//!
//! 状态变化的两条路径：
//! - 领域操作先校验输入，再调用 `raise_change`：分配序号 → 应用 → 记入待提交 → 版本加一；
//! - 仓储重建时调用 `load_from_history`：应用 → 版本加一，不产生待提交变更。
//!
//! 两条路径共用同一个 `apply`，因此相同事件序列得到的状态完全一致。
//!
use crate::aggregate_root::AggregateRoot;
use crate::domain_event::{DomainEvent, EventEnvelope};
use crate::entity::{Entity, Identifier};
use crate::error::{DomainError, DomainResult};
use crate::value_object::Version;

/// 事件溯源聚合
pub trait Aggregate: Sized + Send + Sync + 'static {
    /// 聚合类型名，写入事件元数据，重建时用于校验事件归属
    const TYPE: &'static str;

    type Id: Identifier;
    /// 本聚合的封闭事件集合
    type Event: DomainEvent;
    /// 子实体类型；没有子实体时使用 `NoEntity`
    type Entity: Entity;

    fn root(&self) -> &AggregateRoot<Self>;

    /// 仅供聚合自身的领域操作与 `apply` 使用；子实体标识经 `AggregateRoot::update_entity` 保持不变
    fn root_mut(&mut self) -> &mut AggregateRoot<Self>;

    /// 将事件投影到状态
    fn apply(&mut self, event: &EventEnvelope<Self>);

    fn id(&self) -> Option<&Self::Id> {
        self.root().id()
    }

    fn version(&self) -> Version {
        self.root().version()
    }

    /// 待提交事件（按产生顺序）
    fn pending_changes(&self) -> &[EventEnvelope<Self>] {
        self.root().pending_changes()
    }

    fn has_pending_changes(&self) -> bool {
        !self.root().pending_changes().is_empty()
    }

    /// 清空待提交事件；不影响任何历史状态，可重复调用
    fn mark_pending_changes_as_committed(&mut self) {
        self.root_mut().clear_pending_changes();
    }

    /// 按顺序重放历史事件，仅用于重建聚合
    fn load_from_history<I>(&mut self, history: I)
    where
        I: IntoIterator<Item = EventEnvelope<Self>>,
    {
        let mut replayed = 0usize;
        for event in history {
            self.root_mut().adopt_identity(event.aggregate_id());
            self.apply(&event);
            self.root_mut().advance_version();
            replayed += 1;
        }

        tracing::trace!(
            aggregate_type = Self::TYPE,
            replayed,
            version = %self.version(),
            "replayed history"
        );
    }

    /// 产生一条新事件，聚合标识取自聚合自身。
    ///
    /// 只应在领域操作内部、完成输入校验之后调用。
    fn raise_change(&mut self, event: Self::Event) -> DomainResult<()> {
        let aggregate_id = self.id().cloned().ok_or_else(|| {
            DomainError::invalid_state(format!(
                "cannot raise {} on a {} without identity",
                event.event_type(),
                Self::TYPE
            ))
        })?;

        self.raise_change_for(aggregate_id, event)
    }

    /// 产生一条显式指定聚合标识的新事件，用于创建聚合的第一条事件。
    ///
    /// 聚合已有标识时，指定的标识必须与之相同。
    fn raise_change_for(&mut self, aggregate_id: Self::Id, event: Self::Event) -> DomainResult<()> {
        if let Some(own) = self.id() {
            if own != &aggregate_id {
                return Err(DomainError::invalid_state(format!(
                    "{} targets {} {aggregate_id} but was raised on {own}",
                    event.event_type(),
                    Self::TYPE
                )));
            }
        }

        let envelope = EventEnvelope::<Self>::new(aggregate_id, self.version().next(), event);

        tracing::trace!(
            aggregate_type = Self::TYPE,
            aggregate_id = %envelope.aggregate_id(),
            event_type = envelope.payload().event_type(),
            version = %envelope.aggregate_version(),
            "raised change"
        );

        self.root_mut().adopt_identity(envelope.aggregate_id());
        self.apply(&envelope);
        self.root_mut().record(envelope);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Aggregate;
    use crate::aggregate_root::AggregateRoot;
    use crate::domain_event::{DomainEvent, EventEnvelope};
    use crate::error::{DomainError, DomainResult};
    use crate::value_object::Version;
    use ddd_es_macros::{domain_event, entity};

    #[entity]
    struct Track {
        position: usize,
    }

    #[domain_event(version = 1)]
    enum PlaylistEvent {
        #[event(event_type = "playlist.created")]
        Created { title: String },
        Retitled { title: String },
        TrackAdded {
            #[event(entity_id)]
            track_id: String,
            position: usize,
        },
        TrackMoved {
            #[event(entity_id)]
            track_id: String,
            position: usize,
        },
    }

    #[derive(Debug, Clone, Default)]
    struct Playlist {
        root: AggregateRoot<Playlist>,
        title: String,
    }

    impl Aggregate for Playlist {
        const TYPE: &'static str = "playlist";
        type Id = String;
        type Event = PlaylistEvent;
        type Entity = Track;

        fn root(&self) -> &AggregateRoot<Self> {
            &self.root
        }

        fn root_mut(&mut self) -> &mut AggregateRoot<Self> {
            &mut self.root
        }

        fn apply(&mut self, event: &EventEnvelope<Self>) {
            match event.payload() {
                PlaylistEvent::Created { title } | PlaylistEvent::Retitled { title } => {
                    self.title = title.clone();
                }
                PlaylistEvent::TrackAdded { track_id, position } => {
                    let track = Track {
                        id: track_id.clone(),
                        position: *position,
                    };
                    let _ = self.root.add_entity(track, false);
                }
                PlaylistEvent::TrackMoved { track_id, position } => {
                    let _ = self
                        .root
                        .update_entity(track_id, |track| track.position = *position);
                }
            }
        }
    }

    impl Playlist {
        fn create(id: &str, title: &str) -> DomainResult<Self> {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title must be not blank"));
            }
            let mut playlist = Self::default();
            playlist.raise_change_for(
                id.to_string(),
                PlaylistEvent::Created {
                    title: title.trim().to_string(),
                },
            )?;
            Ok(playlist)
        }

        fn retitle(&mut self, title: &str) -> DomainResult<()> {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title must be not blank"));
            }
            if self.title != title.trim() {
                self.raise_change(PlaylistEvent::Retitled {
                    title: title.trim().to_string(),
                })?;
            }
            Ok(())
        }

        fn add_track(&mut self, track_id: &str) -> DomainResult<()> {
            if self.root.entity_exists(&track_id.to_string()) {
                return Err(DomainError::validation(format!(
                    "track {track_id} is already on the playlist"
                )));
            }
            let position = self.root.entity_count();
            self.raise_change(PlaylistEvent::TrackAdded {
                track_id: track_id.to_string(),
                position,
            })
        }

        fn move_track(&mut self, track_id: &str, position: usize) -> DomainResult<()> {
            self.raise_change(PlaylistEvent::TrackMoved {
                track_id: track_id.to_string(),
                position,
            })
        }

        fn positions(&self) -> Vec<(String, usize)> {
            let mut tracks: Vec<(String, usize)> = self
                .root
                .query_entities(|_| true)
                .into_iter()
                .map(|t| (t.id.clone(), t.position))
                .collect();
            tracks.sort_by_key(|(_, position)| *position);
            tracks
        }
    }

    impl PartialEq for Playlist {
        fn eq(&self, other: &Self) -> bool {
            self.root == other.root
        }
    }

    fn scripted() -> Playlist {
        let mut playlist = Playlist::create("pl-1", "  Road trip ").unwrap();
        playlist.retitle("Road trip 2").unwrap();
        playlist.add_track("t-1").unwrap();
        playlist.add_track("t-2").unwrap();
        playlist.move_track("t-2", 0).unwrap();
        playlist.move_track("t-1", 1).unwrap();
        playlist
    }

    #[test]
    fn creation_sets_identity_version_and_pending() {
        let playlist = Playlist::create("pl-1", "Road trip").unwrap();
        assert_eq!(playlist.id().map(String::as_str), Some("pl-1"));
        assert_eq!(playlist.version(), Version::from_value(1));
        assert_eq!(playlist.pending_changes().len(), 1);

        let created = &playlist.pending_changes()[0];
        assert_eq!(created.aggregate_id(), "pl-1");
        assert_eq!(created.aggregate_version(), Version::from_value(1));
        assert_eq!(created.metadata().aggregate_type(), "playlist");
        assert_eq!(created.payload().event_type(), "playlist.created");
        assert_eq!(created.entity_id(), None);
    }

    #[test]
    fn sequence_positions_follow_the_version() {
        let playlist = scripted();
        assert_eq!(playlist.version(), Version::from_value(6));

        let positions: Vec<usize> = playlist
            .pending_changes()
            .iter()
            .map(|e| e.aggregate_version().value())
            .collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn entity_events_carry_the_target_entity() {
        let playlist = scripted();
        let routed: Vec<Option<&str>> = playlist
            .pending_changes()
            .iter()
            .map(|e| e.entity_id())
            .collect();
        assert_eq!(
            routed,
            vec![None, None, Some("t-1"), Some("t-2"), Some("t-2"), Some("t-1")]
        );
    }

    #[test]
    fn replay_is_equivalent_to_live_application() {
        let live = scripted();
        let history: Vec<EventEnvelope<Playlist>> = live.pending_changes().to_vec();

        let mut replayed = Playlist::default();
        replayed.load_from_history(history.clone());

        assert_eq!(replayed, live);
        assert_eq!(replayed.id(), live.id());
        assert_eq!(replayed.version(), live.version());
        assert_eq!(replayed.title, live.title);
        assert_eq!(replayed.positions(), live.positions());
        assert!(replayed.pending_changes().is_empty());
        assert_eq!(live.pending_changes(), history.as_slice());
    }

    #[test]
    fn version_counts_historical_and_pending_events() {
        let live = scripted();
        let history = live.pending_changes()[..4].to_vec();

        let mut playlist = Playlist::default();
        playlist.load_from_history(history);
        assert_eq!(playlist.version(), Version::from_value(4));
        assert!(!playlist.has_pending_changes());

        playlist.move_track("t-2", 0).unwrap();
        assert_eq!(playlist.version(), Version::from_value(5));
        assert_eq!(
            playlist.pending_changes()[0].aggregate_version(),
            Version::from_value(5)
        );
    }

    #[test]
    fn mark_committed_only_empties_pending_and_is_idempotent() {
        let mut playlist = scripted();
        let version = playlist.version();
        let title = playlist.title.clone();

        playlist.mark_pending_changes_as_committed();
        assert!(playlist.pending_changes().is_empty());
        playlist.mark_pending_changes_as_committed();
        assert!(playlist.pending_changes().is_empty());

        assert_eq!(playlist.version(), version);
        assert_eq!(playlist.title, title);
        assert_eq!(playlist.root.entity_count(), 2);
    }

    #[test]
    fn equal_values_raise_nothing() {
        let mut playlist = Playlist::create("pl-1", "Road trip").unwrap();
        playlist.mark_pending_changes_as_committed();

        playlist.retitle("  Road trip  ").unwrap();
        assert!(playlist.pending_changes().is_empty());
        assert_eq!(playlist.version(), Version::from_value(1));
    }

    #[test]
    fn validation_failures_leave_state_untouched() {
        assert!(Playlist::create("pl-1", "   ").unwrap_err().is_validation());

        let mut playlist = Playlist::create("pl-1", "Road trip").unwrap();
        playlist.add_track("t-1").unwrap();
        let before = playlist.clone();

        assert!(playlist.add_track("t-1").unwrap_err().is_validation());
        assert!(playlist.retitle("").unwrap_err().is_validation());
        assert_eq!(playlist, before);
        assert_eq!(playlist.pending_changes().len(), 2);
    }

    #[test]
    fn raise_without_identity_is_rejected() {
        let mut blank = Playlist::default();
        let err = blank
            .raise_change(PlaylistEvent::Retitled {
                title: "x".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
        assert_eq!(blank.version(), Version::new());
        assert!(blank.pending_changes().is_empty());
    }

    #[test]
    fn identity_never_changes_once_set() {
        let mut playlist = Playlist::create("pl-1", "Road trip").unwrap();
        let err = playlist
            .raise_change_for(
                "pl-2".to_string(),
                PlaylistEvent::Retitled {
                    title: "other".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
        assert_eq!(playlist.id().map(String::as_str), Some("pl-1"));
        assert_eq!(playlist.version(), Version::from_value(1));
    }
}

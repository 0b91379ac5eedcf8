use ddd_es_domain::domain_event::DomainEvent;
use ddd_es_macros::domain_event;

#[domain_event(version = 1)]
enum LedgerEvent {
    #[event(event_type = "ledger.opened")]
    Opened { owner: String },
    #[event(event_version = 3)]
    Renamed { owner: String },
    Closed,
}

fn main() {
    let opened = LedgerEvent::Opened {
        owner: "amy".into(),
    };
    assert_eq!(opened.event_type(), "ledger.opened");
    assert_eq!(opened.event_version(), 1);
    assert_eq!(opened.entity_id(), None);

    let renamed = LedgerEvent::Renamed {
        owner: "bea".into(),
    };
    assert_eq!(renamed.event_type(), "LedgerEvent.Renamed");
    assert_eq!(renamed.event_version(), 3);

    assert_eq!(LedgerEvent::Closed.event_type(), "LedgerEvent.Closed");
    assert_eq!(LedgerEvent::Closed.clone(), LedgerEvent::Closed);
}

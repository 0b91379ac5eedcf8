use ddd_es_domain::domain_event::DomainEvent;
use ddd_es_macros::{domain_event, entity_id};

#[entity_id]
struct LineId(u32);

#[domain_event]
#[derive(Debug)]
enum InvoiceEvent {
    Issued { number: String },
    LineAdded {
        #[event(entity_id)]
        line_id: LineId,
        #[serde(default)]
        amount: u64,
    },
}

fn main() {
    let added = InvoiceEvent::LineAdded {
        line_id: LineId::new(7),
        amount: 120,
    };
    assert_eq!(added.entity_id(), Some("7".to_string()));

    let issued = InvoiceEvent::Issued {
        number: "INV-1".into(),
    };
    assert_eq!(issued.entity_id(), None);

    // 序列化形态：外部标签枚举
    let json = serde_json::to_value(&added).unwrap();
    assert_eq!(json, serde_json::json!({ "LineAdded": { "line_id": 7, "amount": 120 } }));
    let back: InvoiceEvent = serde_json::from_value(json).unwrap();
    assert_eq!(back, added);
}

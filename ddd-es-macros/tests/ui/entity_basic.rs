use ddd_es_domain::entity::Entity;
use ddd_es_macros::{entity, entity_id};

#[entity_id]
struct SeatId(String);

#[entity(id = SeatId)]
#[derive(PartialEq)]
struct Seat {
    row: u8,
}

#[entity]
struct Note {
    text: String,
}

#[entity(debug = false)]
struct Secret {
    value: String,
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret({})", self.id)
    }
}

fn main() {
    let seat = Seat {
        id: SeatId::new("A-1".into()),
        row: 1,
    };
    assert_eq!(seat.id().to_string(), "A-1");
    assert_eq!(seat.clone(), seat);
    assert_eq!(seat.row, 1);

    let note = Note {
        id: "n-1".into(),
        text: "hello".into(),
    };
    assert_eq!(note.id(), "n-1");
    let _ = format!("{note:?} {}", note.text);

    let secret = Secret {
        id: "s-1".into(),
        value: "hidden".into(),
    };
    assert_eq!(format!("{secret:?}"), "Secret(s-1)");
    let _ = secret.value;
}

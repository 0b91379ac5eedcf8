use ddd_es_domain::entity::Entity;

mod venue {
    use ddd_es_macros::entity;

    #[entity]
    pub struct Seat {
        pub row: u8,
    }

    // 已声明的 id 字段同样变为私有
    #[entity]
    pub struct Stage {
        pub id: String,
        pub name: String,
    }

    pub fn seat(id: &str, row: u8) -> Seat {
        Seat {
            id: id.to_string(),
            row,
        }
    }

    pub fn stage(id: &str, name: &str) -> Stage {
        Stage {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

fn main() {
    let mut seat = venue::seat("A-1", 1);
    seat.row = 2;
    assert_eq!(seat.id(), "A-1");
    assert_eq!(seat.row, 2);

    let stage = venue::stage("main", "Main stage");
    assert_eq!(stage.id(), "main");
    assert_eq!(stage.name, "Main stage");
}

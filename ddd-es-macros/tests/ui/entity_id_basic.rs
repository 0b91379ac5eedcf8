use ddd_es_macros::entity_id;
use std::collections::BTreeSet;
use uuid::Uuid;

#[entity_id]
struct UserId(Uuid);

#[entity_id(debug = false)]
struct ProfileId(String);

impl std::fmt::Debug for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProfileId(..)")
    }
}

fn main() {
    let raw = Uuid::new_v4();
    let id = UserId::new(raw);
    let parsed: UserId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
    let inner: &Uuid = id.as_ref();
    assert_eq!(inner, &raw);
    assert_eq!(Uuid::from(id.clone()), raw);
    assert!("not-a-uuid".parse::<UserId>().is_err());

    let mut ordered = BTreeSet::new();
    ordered.insert(ProfileId::from("b".to_string()));
    ordered.insert(ProfileId::from("a".to_string()));
    let first = ordered.iter().next().unwrap().clone();
    assert_eq!(first.into_inner(), "a");
    assert_eq!(format!("{:?}", ProfileId::new("x".into())), "ProfileId(..)");
}

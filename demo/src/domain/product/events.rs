use crate::domain::backlog_item::BacklogItemId;
use ddd_es_macros::domain_event;

#[domain_event(version = 1)]
pub enum ProductEvent {
    #[event(event_type = "ProductCreated")]
    Created { name: String },
    #[event(event_type = "ProductRenamed")]
    Renamed { name: String },
    #[event(event_type = "ProductBacklogItemPlanned")]
    BacklogItemPlanned {
        #[event(entity_id)]
        backlog_item_id: BacklogItemId,
        position: usize,
    },
    #[event(event_type = "ProductBacklogItemPositionChanged")]
    BacklogItemPositionChanged {
        #[event(entity_id)]
        backlog_item_id: BacklogItemId,
        position: usize,
    },
}

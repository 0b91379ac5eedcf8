use super::StoryPoints;
use crate::domain::product::ProductId;
use ddd_es_macros::domain_event;

#[domain_event(version = 1)]
pub enum BacklogItemEvent {
    #[event(event_type = "BacklogItemCreated")]
    Created {
        title: String,
        story_points: StoryPoints,
        product_id: ProductId,
    },
    #[event(event_type = "BacklogItemTitleChanged")]
    TitleChanged { title: String },
    #[event(event_type = "StoryPointsAssignedToBacklogItem")]
    StoryPointsAssigned { story_points: StoryPoints },
}

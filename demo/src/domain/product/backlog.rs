use crate::domain::backlog_item::BacklogItemId;
use ddd_es_macros::entity;

/// 产品内已规划的待办项：只记录标识与在待办列表中的位置（从 0 开始）
#[entity(id = BacklogItemId)]
#[derive(PartialEq, Eq)]
pub struct ProductBacklogItem {
    position: usize,
}

impl ProductBacklogItem {
    pub(super) fn new(id: BacklogItemId, position: usize) -> Self {
        Self { id, position }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub(super) fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

//! Learning content screens shown before a section's quiz.

use crate::domain::foundation::{ContentId, SectionId, Timestamp};

/// One reading screen inside a section's learning flow.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningContent {
    id: ContentId,
    section_id: SectionId,
    screen_title: String,
    content_markdown: String,
    read_time_min: i64,
    order_index: i64,
    created_at: Timestamp,
}

impl LearningContent {
    /// Rebuilds a content screen from a persisted row.
    pub fn reconstitute(
        id: ContentId,
        section_id: SectionId,
        screen_title: String,
        content_markdown: String,
        read_time_min: i64,
        order_index: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            section_id,
            screen_title,
            content_markdown,
            read_time_min,
            order_index,
            created_at,
        }
    }

    pub fn id(&self) -> ContentId {
        self.id
    }

    pub fn section_id(&self) -> SectionId {
        self.section_id
    }

    pub fn screen_title(&self) -> &str {
        &self.screen_title
    }

    pub fn content_markdown(&self) -> &str {
        &self.content_markdown
    }

    pub fn read_time_min(&self) -> i64 {
        self.read_time_min
    }

    pub fn order_index(&self) -> i64 {
        self.order_index
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

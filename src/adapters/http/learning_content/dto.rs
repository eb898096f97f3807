//! DTOs for the learning content endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::LearningContent;

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentScreenResponse {
    pub id: i64,
    pub section_id: i64,
    pub screen_title: String,
    pub content_markdown: String,
    pub read_time_min: i64,
    pub order_index: i64,
}

impl From<&LearningContent> for ContentScreenResponse {
    fn from(content: &LearningContent) -> Self {
        Self {
            id: content.id().as_i64(),
            section_id: content.section_id().as_i64(),
            screen_title: content.screen_title().to_string(),
            content_markdown: content.content_markdown().to_string(),
            read_time_min: content.read_time_min(),
            order_index: content.order_index(),
        }
    }
}

/// One screen in the progress view, without the markdown body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScreenProgressResponse {
    pub id: i64,
    pub screen_title: String,
    pub order_index: i64,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentProgressResponse {
    pub section_id: i64,
    pub screens: Vec<ScreenProgressResponse>,
    pub completed_count: u32,
    pub total_count: u32,
    pub completion_percentage: f64,
}

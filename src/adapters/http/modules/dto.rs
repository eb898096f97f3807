//! DTOs for the module catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Module, Section};
use crate::domain::progress::SectionStatus;

/// One module in the overview list. Per-user fields are absent for
/// anonymous requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleSummaryResponse {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order_index: i64,
    pub section_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_sections: Option<u32>,
}

impl ModuleSummaryResponse {
    pub fn new(module: &Module, section_count: u32, completed_sections: Option<u32>) -> Self {
        Self {
            id: module.id().as_i64(),
            name: module.name().to_string(),
            display_name: module.display_name().to_string(),
            description: module.description().map(str::to_string),
            order_index: module.order_index(),
            section_count,
            completed_sections,
        }
    }
}

/// Per-user view of one section inside a module detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct SectionOverviewResponse {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order_index: i64,
    pub total_questions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learned: Option<bool>,
}

impl SectionOverviewResponse {
    pub fn new(section: &Section, total_questions: u32, status: Option<&SectionStatus>) -> Self {
        Self {
            id: section.id().as_i64(),
            name: section.name().to_string(),
            display_name: section.display_name().to_string(),
            description: section.description().map(str::to_string),
            order_index: section.order_index(),
            total_questions,
            answered: status.map(|s| s.score.answered),
            correct: status.map(|s| s.score.correct),
            completed: status.map(|s| s.completed),
            learned: status.map(|s| s.learned),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleDetailResponse {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order_index: i64,
    pub sections: Vec<SectionOverviewResponse>,
}

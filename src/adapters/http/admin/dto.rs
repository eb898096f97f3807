//! DTOs for the admin endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Module, Question, Section};

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub display_name: String,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct ModuleRequest {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub order_index: i64,
}

#[derive(Debug, Deserialize)]
pub struct SectionRequest {
    pub module_id: i64,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub order_index: i64,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub section_id: i64,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleResponse {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order_index: i64,
    pub created_at: String,
}

impl From<&Module> for ModuleResponse {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id().as_i64(),
            name: module.name().to_string(),
            display_name: module.display_name().to_string(),
            description: module.description().map(str::to_string),
            order_index: module.order_index(),
            created_at: module.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SectionResponse {
    pub id: i64,
    pub module_id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order_index: i64,
    pub created_at: String,
}

impl From<&Section> for SectionResponse {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id().as_i64(),
            module_id: section.module_id().as_i64(),
            name: section.name().to_string(),
            display_name: section.display_name().to_string(),
            description: section.description().map(str::to_string),
            order_index: section.order_index(),
            created_at: section.created_at().to_rfc3339(),
        }
    }
}

/// Admin view of a question. Unlike the learner-facing shape this one
/// includes the correct answer and the explanation.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminQuestionResponse {
    pub id: i64,
    pub section_id: i64,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub question_type: String,
}

impl From<&Question> for AdminQuestionResponse {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id().as_i64(),
            section_id: question.section_id().as_i64(),
            question_text: question.question_text().to_string(),
            options: question.options().as_slice().to_vec(),
            correct_answer: question.correct_answer().to_string(),
            explanation: question.explanation().to_string(),
            question_type: question.question_type().to_string(),
        }
    }
}

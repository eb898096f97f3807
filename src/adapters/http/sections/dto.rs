//! DTOs for the section endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Question, Section};
use crate::domain::progress::{CompletionRecord, SectionScore, SectionStatus};
use crate::ports::StoredAnswer;

#[derive(Debug, Serialize, Deserialize)]
pub struct SectionDetailResponse {
    pub id: i64,
    pub module_id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order_index: i64,
    pub total_questions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SectionStatus>,
}

impl SectionDetailResponse {
    pub fn new(section: &Section, total_questions: u32, status: Option<SectionStatus>) -> Self {
        Self {
            id: section.id().as_i64(),
            module_id: section.module_id().as_i64(),
            name: section.name().to_string(),
            display_name: section.display_name().to_string(),
            description: section.description().map(str::to_string),
            order_index: section.order_index(),
            total_questions,
            status,
        }
    }
}

/// A quiz question as shown to the learner. The correct answer and the
/// explanation stay server-side until the question is answered.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuizQuestionResponse {
    pub id: i64,
    pub question_text: String,
    pub options: Vec<String>,
    pub question_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub was_correct: Option<bool>,
}

impl QuizQuestionResponse {
    pub fn new(question: &Question, previous: Option<&StoredAnswer>) -> Self {
        Self {
            id: question.id().as_i64(),
            question_text: question.question_text().to_string(),
            options: question.options().as_slice().to_vec(),
            question_type: question.question_type().to_string(),
            selected_answer: previous.and_then(|a| a.selected_answer.clone()),
            was_correct: previous.map(|a| a.is_correct),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SectionQuestionsResponse {
    pub section_id: i64,
    pub questions: Vec<QuizQuestionResponse>,
    pub score: SectionScore,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub section_id: i64,
    pub completion: CompletionRecord,
    pub score: SectionScore,
}

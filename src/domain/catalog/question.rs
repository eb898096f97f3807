//! Question value type and answer grading.
//!
//! The `options` column is a JSON-encoded array of strings (legacy of the
//! CSV import pipeline). The correct answer is stored verbatim alongside it
//! and must never be serialized to the client before the user has answered.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, SectionId, Timestamp, ValidationError};

/// The only question type the application currently ships.
pub const QUESTION_TYPE_MULTIPLE_CHOICE: &str = "multiple_choice";

/// Answer options for a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionOptions(Vec<String>);

impl QuestionOptions {
    /// Builds options, requiring at least two non-empty choices.
    pub fn new(options: Vec<String>) -> Result<Self, ValidationError> {
        if options.len() < 2 {
            return Err(ValidationError::out_of_range(
                "options",
                2,
                10,
                options.len() as i64,
            ));
        }
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(ValidationError::empty_field("options"));
        }
        Ok(Self(options))
    }

    /// Parses the JSON column format.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let options: Vec<String> = serde_json::from_str(json)
            .map_err(|e| ValidationError::invalid_format("options", e.to_string()))?;
        Self::new(options)
    }

    /// Renders the JSON column format.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).expect("string vec always serializes")
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, answer: &str) -> bool {
        self.0.iter().any(|o| o == answer)
    }
}

/// Outcome of grading one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: QuestionId,
    section_id: SectionId,
    question_text: String,
    options: QuestionOptions,
    correct_answer: String,
    explanation: String,
    question_type: String,
    created_at: Timestamp,
}

impl Question {
    /// Rebuilds a question from a persisted row.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: QuestionId,
        section_id: SectionId,
        question_text: String,
        options: QuestionOptions,
        correct_answer: String,
        explanation: String,
        question_type: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            section_id,
            question_text,
            options,
            correct_answer,
            explanation,
            question_type,
            created_at,
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn section_id(&self) -> SectionId {
        self.section_id
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn options(&self) -> &QuestionOptions {
        &self.options
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn question_type(&self) -> &str {
        &self.question_type
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// The stored correct answer. Only the grading path and admin content
    /// management may look at this.
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Grades a submitted answer. Comparison is exact on the option text,
    /// matching how the importer stored `correct_answer`.
    pub fn grade(&self, selected_answer: &str) -> AnswerOutcome {
        AnswerOutcome {
            is_correct: selected_answer == self.correct_answer,
            correct_answer: self.correct_answer.clone(),
            explanation: self.explanation.clone(),
        }
    }

    /// Checks that the submitted answer is one of the offered options.
    pub fn accepts(&self, selected_answer: &str) -> bool {
        self.options.contains(selected_answer)
    }
}

/// Validates fields of a question create/update request.
pub fn validate_question_fields(
    question_text: &str,
    options: &QuestionOptions,
    correct_answer: &str,
    explanation: &str,
) -> Result<(), ValidationError> {
    if question_text.trim().is_empty() {
        return Err(ValidationError::empty_field("question_text"));
    }
    if explanation.trim().is_empty() {
        return Err(ValidationError::empty_field("explanation"));
    }
    if !options.contains(correct_answer) {
        return Err(ValidationError::invalid_format(
            "correct_answer",
            "must match one of the options",
        ));
    }
    Ok(())
}

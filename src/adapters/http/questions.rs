//! Answer submission endpoint.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::application::handlers::progress::SubmitAnswerCommand;
use crate::domain::foundation::QuestionId;
use crate::domain::progress::SectionScore;

use super::error::ApiError;
use super::middleware::RequireAuth;
use super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub selected_answer: String,
}

/// Grading outcome returned to the client. The correct answer and the
/// explanation are only revealed here, after a submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResultResponse {
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
    pub xp_awarded: i64,
    pub total_xp: i64,
    pub level: i64,
    pub section_score: SectionScore,
}

/// POST /api/questions/:id/answer
pub async fn submit_answer(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResultResponse>, ApiError> {
    let result = state
        .submit_answer
        .handle(SubmitAnswerCommand {
            user_id: user.id,
            question_id: QuestionId::new(id),
            selected_answer: req.selected_answer,
        })
        .await?;
    Ok(Json(AnswerResultResponse {
        is_correct: result.is_correct,
        correct_answer: result.correct_answer,
        explanation: result.explanation,
        xp_awarded: result.xp_awarded,
        total_xp: result.total_xp,
        level: result.level,
        section_score: result.section_score,
    }))
}

pub fn question_routes() -> Router<AppState> {
    Router::new().route("/:id/answer", post(submit_answer))
}

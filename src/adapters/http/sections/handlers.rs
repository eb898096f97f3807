//! HTTP handlers for the section endpoints.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::handlers::progress::{CompleteSectionCommand, MarkSectionLearnedCommand};
use crate::domain::foundation::{DomainError, ErrorCode, SectionId};
use crate::domain::progress::SectionStatus;

use super::super::auth::dto::MessageResponse;
use super::super::error::ApiError;
use super::super::middleware::{OptionalAuth, RequireAuth};
use super::super::state::AppState;
use super::dto::{
    CompletionResponse, QuizQuestionResponse, SectionDetailResponse, SectionQuestionsResponse,
};

fn section_not_found() -> DomainError {
    DomainError::new(ErrorCode::SectionNotFound, "Section not found")
}

/// GET /api/sections/:id
pub async fn get_section(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<i64>,
) -> Result<Json<SectionDetailResponse>, ApiError> {
    let section_id = SectionId::new(id);
    let section = state
        .catalog
        .find_section(section_id)
        .await?
        .ok_or_else(section_not_found)?;
    let questions = state.catalog.questions_for_section(section_id).await?;

    let status = match &user {
        Some(user) => {
            let score = state.progress.section_score(user.id, section_id).await?;
            let learned = state.progress.is_learned(user.id, section_id).await?;
            let completion = state.progress.find_completion(user.id, section_id).await?;
            Some(SectionStatus::new(score, learned, completion.is_some()))
        }
        None => None,
    };

    Ok(Json(SectionDetailResponse::new(
        &section,
        questions.len() as u32,
        status,
    )))
}

/// GET /api/sections/:id/questions
///
/// The quiz view. Previously answered questions carry the user's selection
/// so a retake can show prior results.
pub async fn get_section_questions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<SectionQuestionsResponse>, ApiError> {
    let section_id = SectionId::new(id);
    if state.catalog.find_section(section_id).await?.is_none() {
        return Err(section_not_found().into());
    }
    let questions = state.catalog.questions_for_section(section_id).await?;
    let answers = state
        .progress
        .answers_for_section(user.id, section_id)
        .await?;
    let by_question: HashMap<i64, _> = answers
        .into_iter()
        .map(|a| (a.question_id.as_i64(), a))
        .collect();

    let score = state.progress.section_score(user.id, section_id).await?;
    let questions = questions
        .iter()
        .map(|q| QuizQuestionResponse::new(q, by_question.get(&q.id().as_i64())))
        .collect();

    Ok(Json(SectionQuestionsResponse {
        section_id: id,
        questions,
        score,
    }))
}

/// POST /api/sections/:id/learn
pub async fn mark_learned(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .mark_learned
        .handle(MarkSectionLearnedCommand {
            user_id: user.id,
            section_id: SectionId::new(id),
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "Section marked as learned".to_string(),
    }))
}

/// POST /api/sections/:id/complete
///
/// Fails with 409 while unanswered questions remain.
pub async fn complete_section(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let result = state
        .complete_section
        .handle(CompleteSectionCommand {
            user_id: user.id,
            section_id: SectionId::new(id),
        })
        .await?;
    Ok(Json(CompletionResponse {
        section_id: id,
        completion: result.completion,
        score: result.score,
    }))
}

//! HTTP handlers for the learning content endpoints.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::Json;

use crate::domain::foundation::{ContentId, DomainError, ErrorCode, SectionId};

use super::super::auth::dto::MessageResponse;
use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{ContentProgressResponse, ContentScreenResponse, ScreenProgressResponse};

fn section_not_found() -> DomainError {
    DomainError::new(ErrorCode::SectionNotFound, "Section not found")
}

/// GET /api/learning-content/section/:id
pub async fn get_section_content(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ContentScreenResponse>>, ApiError> {
    let section_id = SectionId::new(id);
    if state.catalog.find_section(section_id).await?.is_none() {
        return Err(section_not_found().into());
    }
    let screens = state.catalog.content_for_section(section_id).await?;
    Ok(Json(screens.iter().map(ContentScreenResponse::from).collect()))
}

/// GET /api/learning-content/section/:id/progress
pub async fn get_content_progress(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<ContentProgressResponse>, ApiError> {
    let section_id = SectionId::new(id);
    if state.catalog.find_section(section_id).await?.is_none() {
        return Err(section_not_found().into());
    }
    let screens = state.catalog.content_for_section(section_id).await?;
    let completed: HashSet<ContentId> = state
        .progress
        .completed_content_ids(user.id, section_id)
        .await?
        .into_iter()
        .collect();

    let total_count = screens.len() as u32;
    let completed_count = screens
        .iter()
        .filter(|s| completed.contains(&s.id()))
        .count() as u32;
    let completion_percentage = if total_count == 0 {
        0.0
    } else {
        completed_count as f64 * 100.0 / total_count as f64
    };

    Ok(Json(ContentProgressResponse {
        section_id: id,
        screens: screens
            .iter()
            .map(|s| ScreenProgressResponse {
                id: s.id().as_i64(),
                screen_title: s.screen_title().to_string(),
                order_index: s.order_index(),
                completed: completed.contains(&s.id()),
            })
            .collect(),
        completed_count,
        total_count,
        completion_percentage,
    }))
}

/// POST /api/learning-content/:id/complete
pub async fn complete_content(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let content_id = ContentId::new(id);
    if state.catalog.find_content(content_id).await?.is_none() {
        return Err(
            DomainError::new(ErrorCode::ContentNotFound, "Learning content not found").into(),
        );
    }
    state
        .progress
        .mark_content_complete(user.id, content_id)
        .await?;
    Ok(Json(MessageResponse {
        message: "Content marked as complete".to_string(),
    }))
}

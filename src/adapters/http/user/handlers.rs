//! HTTP handlers for the profile and stats endpoints.

use axum::extract::State;
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::super::auth::dto::UserResponse;
use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{StatsResponse, UpdateProfileRequest};

fn account_gone() -> DomainError {
    DomainError::new(ErrorCode::Unauthorized, "Account no longer exists")
}

/// GET /api/user/stats
pub async fn get_stats(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<StatsResponse>, ApiError> {
    let account = state
        .users
        .find_by_id(user.id)
        .await?
        .ok_or_else(account_gone)?;
    let stats = state.progress.user_stats(user.id).await?;
    Ok(Json(StatsResponse {
        user: UserResponse::from(&account),
        stats,
    }))
}

/// PUT /api/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let mut account = state
        .users
        .find_by_id(user.id)
        .await?
        .ok_or_else(account_gone)?;
    account
        .update_profile(req.display_name, req.avatar_key)
        .map_err(DomainError::from)?;
    state.users.update(&account).await?;
    Ok(Json(UserResponse::from(&account)))
}

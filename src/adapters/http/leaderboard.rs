//! Leaderboard endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub display_name: String,
    pub avatar_key: String,
    pub total_xp: i64,
    pub level: i64,
}

/// GET /api/leaderboard
///
/// Public. Emails and ids are deliberately left out of the entries.
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let top = state
        .users
        .top_by_xp(state.config.content.leaderboard_size)
        .await?;
    let entries = top
        .iter()
        .enumerate()
        .map(|(i, user)| LeaderboardEntry {
            rank: i as u32 + 1,
            display_name: user.display_name().to_string(),
            avatar_key: user.avatar_key().to_string(),
            total_xp: user.total_xp(),
            level: user.level(),
        })
        .collect();
    Ok(Json(entries))
}

pub fn leaderboard_routes() -> Router<AppState> {
    Router::new().route("/", get(get_leaderboard))
}

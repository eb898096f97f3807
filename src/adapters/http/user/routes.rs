//! Routes for the profile and stats endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{get_stats, update_profile};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/profile", put(update_profile))
}

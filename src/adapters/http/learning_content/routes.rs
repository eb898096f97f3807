//! Routes for the learning content endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{complete_content, get_content_progress, get_section_content};

pub fn learning_content_routes() -> Router<AppState> {
    Router::new()
        .route("/section/:id", get(get_section_content))
        .route("/section/:id/progress", get(get_content_progress))
        .route("/:id/complete", post(complete_content))
}

//! Routes for the section endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{complete_section, get_section, get_section_questions, mark_learned};

pub fn section_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_section))
        .route("/:id/questions", get(get_section_questions))
        .route("/:id/learn", post(mark_learned))
        .route("/:id/complete", post(complete_section))
}

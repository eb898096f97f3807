//! Routes for the admin endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::state::AppState;
use super::super::support::list_tickets;
use super::handlers::{
    create_module, create_question, create_section, delete_module, delete_question,
    delete_section, delete_user, list_users, update_module, update_question, update_section,
    update_user,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", put(update_user).delete(delete_user))
        .route("/modules", post(create_module))
        .route("/modules/:id", put(update_module).delete(delete_module))
        .route("/sections", post(create_section))
        .route("/sections/:id", put(update_section).delete(delete_section))
        .route(
            "/questions/:id",
            put(update_question).delete(delete_question),
        )
        .route("/questions", post(create_question))
        .route("/support", get(list_tickets))
}

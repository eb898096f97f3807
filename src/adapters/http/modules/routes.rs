//! Routes for the module catalog.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{get_module, list_modules};

pub fn module_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_modules))
        .route("/:id", get(get_module))
}

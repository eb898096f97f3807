//! Routes for the session endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{login, logout, me, register};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

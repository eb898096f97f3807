//! Top-level router assembly.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::admin::admin_routes;
use super::auth::auth_routes;
use super::error::ErrorResponse;
use super::health::health_routes;
use super::leaderboard::leaderboard_routes;
use super::learning_content::learning_content_routes;
use super::maintenance::maintenance_routes;
use super::middleware::{auth_middleware, AuthLayerState};
use super::modules::module_routes;
use super::questions::question_routes;
use super::sections::section_routes;
use super::state::AppState;
use super::support::support_routes;
use super::user::user_routes;

async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("NOT_FOUND", "Unknown API route")),
    )
}

/// CORS for the browser client. Cookie auth needs credentialed requests,
/// so origins are listed explicitly instead of using a wildcard.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        return CorsLayer::new();
    }
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Builds the application router: the JSON API under `/api`, static asset
/// directories, and the shared middleware stack.
pub fn build_router(state: AppState) -> Router {
    let auth_layer = AuthLayerState {
        tokens: state.tokens.clone(),
        cookie_name: state.config.auth.cookie_name.clone(),
    };

    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/modules", module_routes())
        .nest("/sections", section_routes())
        .nest("/questions", question_routes())
        .nest("/learning-content", learning_content_routes())
        .nest("/user", user_routes())
        .nest("/leaderboard", leaderboard_routes())
        .nest("/support", support_routes())
        .nest("/maintenance", maintenance_routes())
        .nest("/admin", admin_routes())
        .nest("/health", health_routes())
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api)
        .nest_service(
            "/avatars",
            ServeDir::new(&state.config.content.avatars_dir),
        )
        .nest_service(
            "/phishing-examples",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=86400"),
                ))
                .service(ServeDir::new(&state.config.content.phishing_examples_dir)),
        )
        .layer(from_fn_with_state(auth_layer, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.server))
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.server.request_timeout_secs,
        )))
        .with_state(state)
}

//! Health check endpoint.

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Timestamp::now().to_rfc3339(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

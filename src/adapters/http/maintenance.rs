//! Admin maintenance endpoints: consistency report and repairs.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::ports::{DedupeOutcome, MaintenanceReport};

use super::error::ApiError;
use super::middleware::RequireAdmin;
use super::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct RebuildResponse {
    pub completions_written: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub users_corrected: u64,
}

/// GET /api/admin/maintenance/report
pub async fn get_report(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<MaintenanceReport>, ApiError> {
    Ok(Json(state.maintenance.report().await?))
}

/// POST /api/admin/maintenance/dedupe-sections
pub async fn dedupe_sections(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DedupeOutcome>, ApiError> {
    Ok(Json(state.maintenance.dedupe_sections().await?))
}

/// POST /api/admin/maintenance/rebuild-completions
pub async fn rebuild_completions(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<RebuildResponse>, ApiError> {
    let completions_written = state.maintenance.rebuild_completions().await?;
    Ok(Json(RebuildResponse {
        completions_written,
    }))
}

/// POST /api/admin/maintenance/reconcile-xp
pub async fn reconcile_xp(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ReconcileResponse>, ApiError> {
    let users_corrected = state.maintenance.reconcile_xp().await?;
    Ok(Json(ReconcileResponse { users_corrected }))
}

pub fn maintenance_routes() -> Router<AppState> {
    Router::new()
        .route("/report", get(get_report))
        .route("/dedupe-sections", post(dedupe_sections))
        .route("/rebuild-completions", post(rebuild_completions))
        .route("/reconcile-xp", post(reconcile_xp))
}

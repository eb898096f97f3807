//! Support contact endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::{NewTicket, SupportTicket};

use super::error::ApiError;
use super::middleware::{OptionalAuth, RequireAdmin};
use super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketResponse {
    pub reference: String,
    pub created_at: String,
}

/// POST /api/support/contact
///
/// Open to anonymous visitors; a signed-in user's ticket is linked to
/// their account.
pub async fn create_ticket(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Json(req): Json<ContactRequest>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let subject = req.subject.trim();
    let message = req.message.trim();
    if subject.is_empty() {
        return Err(DomainError::from(ValidationError::empty_field("subject")).into());
    }
    if message.is_empty() {
        return Err(DomainError::from(ValidationError::empty_field("message")).into());
    }

    let ticket = state
        .support
        .create(&NewTicket {
            user_id: user.map(|u| u.id),
            subject: subject.to_string(),
            message: message.to_string(),
        })
        .await?;
    tracing::info!(reference = %ticket.reference, "support ticket created");

    Ok((
        StatusCode::CREATED,
        Json(TicketResponse {
            reference: ticket.reference,
            created_at: ticket.created_at.to_rfc3339(),
        }),
    ))
}

/// GET /api/admin/support
pub async fn list_tickets(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<SupportTicket>>, ApiError> {
    Ok(Json(state.support.list_all().await?))
}

pub fn support_routes() -> Router<AppState> {
    Router::new().route("/contact", post(create_ticket))
}

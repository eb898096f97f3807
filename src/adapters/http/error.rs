//! Error mapping from the domain to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Wrapper that lets handlers bubble domain errors with `?`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::UserNotFound
        | ErrorCode::ModuleNotFound
        | ErrorCode::SectionNotFound
        | ErrorCode::QuestionNotFound
        | ErrorCode::ContentNotFound => StatusCode::NOT_FOUND,
        ErrorCode::EmailTaken | ErrorCode::SectionIncomplete | ErrorCode::DuplicateEntry => {
            StatusCode::CONFLICT
        }
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);

        // Infrastructure failures are logged in full and masked for clients.
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(code = %self.0.code, message = %self.0.message, "request failed");
            ErrorResponse::new("INTERNAL_ERROR", "Internal server error")
        } else {
            let details = if self.0.details.is_empty() {
                None
            } else {
                serde_json::to_value(&self.0.details).ok()
            };
            ErrorResponse {
                code: self.0.code.to_string(),
                message: self.0.message,
                details,
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        assert_eq!(status_for(ErrorCode::EmptyField), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(ErrorCode::ValidationFailed),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn incomplete_section_maps_to_conflict() {
        assert_eq!(status_for(ErrorCode::SectionIncomplete), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::EmailTaken), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_errors_mask_the_message() {
        let response =
            ApiError(DomainError::new(ErrorCode::DatabaseError, "connection refused"))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn domain_details_are_serialized() {
        let err = DomainError::new(ErrorCode::SectionIncomplete, "answer everything")
            .with_detail("answered", "1");
        let response = ApiError(err).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}

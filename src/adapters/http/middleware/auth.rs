//! Authentication middleware and extractors.
//!
//! The middleware validates the session token through the `TokenService`
//! port and injects `AuthenticatedUser` into request extensions. Handlers
//! opt in via `RequireAuth`, `OptionalAuth`, or `RequireAdmin`.
//!
//! The token is read from the session cookie first (the browser client's
//! path), with an `Authorization: Bearer` fallback for API callers.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::TokenService;

use super::super::error::ErrorResponse;

/// State for the auth middleware layer.
#[derive(Clone)]
pub struct AuthLayerState {
    pub tokens: Arc<dyn TokenService>,
    pub cookie_name: String,
}

/// Pulls the named cookie's value out of the Cookie header.
fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

fn extract_token<'a>(request: &'a Request, cookie_name: &str) -> Option<&'a str> {
    let headers = request.headers();
    headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| cookie_value(h, cookie_name))
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
        })
}

/// Validates the session token and injects the user into extensions.
///
/// A missing token is not an error here; routes that need a user enforce
/// it through the extractors. An invalid or expired token is rejected
/// immediately so clients clear stale sessions.
pub async fn auth_middleware(
    State(state): State<AuthLayerState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(&request, &state.cookie_name).map(str::to_owned) else {
        return next.run(request).await;
    };

    match state.tokens.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            let message = match e {
                AuthError::TokenExpired => "Session expired",
                _ => "Invalid session token",
            };
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("UNAUTHORIZED", message)),
            )
                .into_response()
        }
    }
}

/// Extractor for routes that require a signed-in user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor for routes that behave differently for signed-in users.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Extractor for admin-only routes.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthRejection::Unauthenticated)?;
        if !user.is_admin {
            return Err(AuthRejection::NotAdmin);
        }
        Ok(RequireAdmin(user))
    }
}

/// Rejection for the auth extractors.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
    NotAdmin,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required",
            ),
            AuthRejection::NotAdmin => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Administrator access required",
            ),
        };
        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

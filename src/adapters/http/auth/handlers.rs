//! HTTP handlers for the session endpoints.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::handlers::auth::{AuthSession, LoginUserCommand, RegisterUserCommand};
use crate::config::AuthConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{LoginRequest, MessageResponse, RegisterRequest, SessionResponse, UserResponse};

fn session_cookie(config: &AuthConfig, token: &str, max_age_secs: i64) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        config.cookie_name, token, max_age_secs
    );
    if config.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

fn session_response(state: &AppState, status: StatusCode, session: AuthSession) -> Response {
    let cookie = session_cookie(
        &state.config.auth,
        &session.token.token,
        state.config.auth.token_lifetime_secs as i64,
    );
    let body = SessionResponse {
        token: session.token.token,
        expires_at: session.token.expires_at.to_rfc3339(),
        user: UserResponse::from(&session.user),
    };
    (status, [(header::SET_COOKIE, cookie)], Json(body)).into_response()
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let session = state
        .register
        .handle(RegisterUserCommand {
            email: req.email,
            password: req.password,
            display_name: req.display_name,
        })
        .await?;
    Ok(session_response(&state, StatusCode::CREATED, session))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let session = state
        .login
        .handle(LoginUserCommand {
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok(session_response(&state, StatusCode::OK, session))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> Response {
    let cookie = session_cookie(&state.config.auth, "", 0);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Signed out".to_string(),
        }),
    )
        .into_response()
}

/// GET /api/auth/me
///
/// Reloads the account so the response reflects current XP, not the
/// values frozen into the token at login.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<UserResponse>, ApiError> {
    let account = state.users.find_by_id(user.id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::Unauthorized, "Account no longer exists")
    })?;
    Ok(Json(UserResponse::from(&account)))
}

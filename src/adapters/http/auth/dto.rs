//! DTOs for the session endpoints.
//!
//! `UserResponse` is the canonical JSON shape of an account and is reused
//! by the user and admin areas.

use serde::{Deserialize, Serialize};

use crate::domain::progress::xp_to_next_level;
use crate::domain::user::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// JSON shape of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub avatar_key: String,
    pub total_xp: i64,
    pub level: i64,
    pub xp_to_next_level: i64,
    pub is_admin: bool,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_i64(),
            email: user.email().to_string(),
            display_name: user.display_name().to_string(),
            avatar_key: user.avatar_key().to_string(),
            total_xp: user.total_xp(),
            level: user.level(),
            xp_to_next_level: xp_to_next_level(user.total_xp()),
            is_admin: user.is_admin(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Body returned on register and login. The token is also set as a cookie;
/// it is echoed here for non-browser clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a validated
//! session token. They carry only the claims the application uses; the
//! `TokenService` port populates them, so the HTTP layer never touches JWT
//! internals directly.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The user's database id.
    pub id: UserId,

    /// User's email address from the token claims.
    pub email: String,

    /// Whether the user holds the administrator flag.
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// Typically called by the `TokenService` adapter after successfully
    /// validating a session token.
    pub fn new(id: UserId, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id,
            email: email.into(),
            is_admin,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists in the system.
    #[error("User not found")]
    UserNotFound,

    /// Token could not be issued.
    #[error("Token issuance failed: {0}")]
    IssuanceFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_carries_claims() {
        let user = AuthenticatedUser::new(UserId::new(3), "user@example.com", true);
        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.email, "user@example.com");
        assert!(user.is_admin);
    }

    #[test]
    fn auth_error_displays_stable_messages() {
        assert_eq!(
            AuthError::InvalidToken.to_string(),
            "Invalid or expired token"
        );
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
    }
}

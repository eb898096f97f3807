//! TokenService port - session token issuance and validation.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp};

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Contract for issuing and validating session tokens.
///
/// Keeping this a port means the HTTP middleware never touches JWT
/// internals and tests can swap in a mock.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Issues a token carrying the user's id, email, and admin flag.
    async fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError>;

    /// Validates a token and reconstructs the authenticated user.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

//! Test doubles for the auth ports.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, Timestamp};
use crate::ports::{IssuedToken, PasswordHasher, TokenService};

/// Token service handing out predictable `mock-token-<id>` strings.
#[derive(Default)]
pub struct MockTokenService {
    users: Mutex<HashMap<String, AuthenticatedUser>>,
}

impl MockTokenService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenService for MockTokenService {
    async fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError> {
        let token = format!("mock-token-{}", user.id);
        self.users
            .lock()
            .map_err(|_| AuthError::IssuanceFailed("mock lock poisoned".to_string()))?
            .insert(token.clone(), user.clone());
        Ok(IssuedToken {
            token,
            expires_at: Timestamp::now().plus_seconds(3600),
        })
    }

    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.users
            .lock()
            .map_err(|_| AuthError::InvalidToken)?
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Hasher that prefixes instead of hashing, keeping tests readable.
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("hashed:{}", password))
    }
}

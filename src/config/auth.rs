//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (JWT session tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,

    /// Token issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Token lifetime in seconds
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_secs: u64,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the session cookie Secure (HTTPS only)
    #[serde(default)]
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// Get token lifetime as Duration
    pub fn token_lifetime(&self) -> Duration {
        Duration::from_secs(self.token_lifetime_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires a signing secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_JWT_SECRET"));
        }
        if *environment == Environment::Production && self.jwt_secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.token_lifetime_secs < 60 || self.token_lifetime_secs > 30 * 24 * 3600 {
            return Err(ValidationError::InvalidTokenLifetime);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: default_issuer(),
            token_lifetime_secs: default_token_lifetime(),
            cookie_name: default_cookie_name(),
            secure_cookies: false,
        }
    }
}

fn default_issuer() -> String {
    "sensebait".to_string()
}

fn default_token_lifetime() -> u64 {
    // 7 days, same as the session cookie lifetime of the original deployment
    7 * 24 * 3600
}

fn default_cookie_name() -> String {
    "token".to_string()
}

//! JWT session tokens (HS256).

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{IssuedToken, TokenService};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    email: String,
    is_admin: bool,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates HS256 session tokens.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    lifetime_secs: i64,
}

impl JwtTokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            lifetime_secs: config.token_lifetime_secs as i64,
        }
    }
}

#[async_trait]
impl TokenService for JwtTokenService {
    async fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError> {
        let now = Timestamp::now();
        let expires_at = now.plus_seconds(self.lifetime_secs);
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            iss: self.issuer.clone(),
            iat: now.unix_seconds(),
            exp: expires_at.unix_seconds(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::IssuanceFailed(e.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let id: i64 = data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(
            UserId::new(id),
            data.claims.email,
            data.claims.is_admin,
        ))
    }
}

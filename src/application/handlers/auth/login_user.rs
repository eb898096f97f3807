//! LoginUserHandler - verifies credentials and signs the user in.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::{PasswordHasher, TokenService, UserRepository};

use super::AuthSession;

/// Command to sign in with email and password.
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

/// Handler for credential login.
pub struct LoginUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Signs the user in. Unknown email and wrong password produce the
    /// same error, so the endpoint cannot be used to probe for accounts.
    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<AuthSession, DomainError> {
        let email = cmd.email.trim().to_lowercase();

        let Some((user, hash)) = self.users.credentials_by_email(&email).await? else {
            return Err(invalid_credentials());
        };
        if !self.hasher.verify(&cmd.password, &hash)? {
            return Err(invalid_credentials());
        }

        let claims = AuthenticatedUser::new(user.id(), user.email(), user.is_admin());
        let token = self.tokens.issue(&claims).await.map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Token issuance failed: {}", e))
        })?;

        Ok(AuthSession { user, token })
    }
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::mock::{MockPasswordHasher, MockTokenService};
    use crate::application::handlers::test_support::MockUserRepository;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::user::User;

    fn existing_user() -> User {
        User::reconstitute(
            UserId::new(1),
            "alice@example.com".to_string(),
            "Alice".to_string(),
            "robot_coral".to_string(),
            120,
            2,
            false,
            Timestamp::now(),
            Timestamp::now(),
        )
    }

    fn handler() -> LoginUserHandler {
        let users = MockUserRepository::new().with_user(existing_user(), "hashed:secret-pass");
        LoginUserHandler::new(
            Arc::new(users),
            Arc::new(MockPasswordHasher),
            Arc::new(MockTokenService::new()),
        )
    }

    #[tokio::test]
    async fn valid_credentials_return_a_session() {
        let session = handler()
            .handle(LoginUserCommand {
                email: "alice@example.com".to_string(),
                password: "secret-pass".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(session.user.total_xp(), 120);
        assert!(!session.token.token.is_empty());
    }

    #[tokio::test]
    async fn email_is_matched_case_insensitively() {
        assert!(handler()
            .handle(LoginUserCommand {
                email: " Alice@EXAMPLE.com ".to_string(),
                password: "secret-pass".to_string(),
            })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let wrong_password = handler()
            .handle(LoginUserCommand {
                email: "alice@example.com".to_string(),
                password: "nope".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = handler()
            .handle(LoginUserCommand {
                email: "nobody@example.com".to_string(),
                password: "secret-pass".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.code, ErrorCode::InvalidCredentials);
        assert_eq!(unknown_email.code, ErrorCode::InvalidCredentials);
        assert_eq!(wrong_password.message, unknown_email.message);
    }
}

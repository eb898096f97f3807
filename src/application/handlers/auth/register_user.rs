//! RegisterUserHandler - creates an account and signs the user in.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::domain::user::{validate_password, NewUser};
use crate::ports::{PasswordHasher, TokenService, UserRepository};

use super::AuthSession;

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Handler for account registration.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl RegisterUserHandler {
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

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<AuthSession, DomainError> {
        validate_password(&cmd.password)?;
        let password_hash = self.hasher.hash(&cmd.password)?;
        let new_user = NewUser::new(cmd.email, password_hash, cmd.display_name)?;

        let user = self.users.create(&new_user).await?;

        let claims = AuthenticatedUser::new(user.id(), user.email(), user.is_admin());
        let token = self.tokens.issue(&claims).await.map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Token issuance failed: {}", e))
        })?;

        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::mock::{MockPasswordHasher, MockTokenService};
    use crate::application::handlers::test_support::MockUserRepository;

    fn handler(users: Arc<MockUserRepository>) -> RegisterUserHandler {
        RegisterUserHandler::new(
            users,
            Arc::new(MockPasswordHasher),
            Arc::new(MockTokenService::new()),
        )
    }

    fn command() -> RegisterUserCommand {
        RegisterUserCommand {
            email: "alice@example.com".to_string(),
            password: "longenough1".to_string(),
            display_name: "Alice".to_string(),
        }
    }

    #[tokio::test]
    async fn registration_stores_hash_and_issues_token() {
        let users = Arc::new(MockUserRepository::new());
        let session = handler(users.clone()).handle(command()).await.unwrap();

        assert_eq!(session.user.email(), "alice@example.com");
        assert!(session.token.token.starts_with("mock-token-"));

        let (_, hash) = users
            .credentials_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hash, "hashed:longenough1");
    }

    #[tokio::test]
    async fn short_password_is_rejected_before_hashing() {
        let users = Arc::new(MockUserRepository::new());
        let err = handler(users)
            .handle(RegisterUserCommand {
                password: "short".to_string(),
                ..command()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
    }

    #[tokio::test]
    async fn duplicate_email_reports_email_taken() {
        let users = Arc::new(MockUserRepository::new());
        let handler = handler(users);
        handler.handle(command()).await.unwrap();
        let err = handler.handle(command()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailTaken);
    }

    #[tokio::test]
    async fn email_is_normalized_on_registration() {
        let users = Arc::new(MockUserRepository::new());
        let session = handler(users)
            .handle(RegisterUserCommand {
                email: "  ALICE@Example.com ".to_string(),
                ..command()
            })
            .await
            .unwrap();
        assert_eq!(session.user.email(), "alice@example.com");
    }
}

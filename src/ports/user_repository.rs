//! UserRepository port - account persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{NewUser, User};

/// Persistence contract for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new account and returns the stored row.
    ///
    /// Fails with `ErrorCode::EmailTaken` when the email is already in use.
    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Fetches an account together with its password hash, for login.
    async fn credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, DomainError>;

    /// All accounts, for the admin user list.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Persists mutable profile state: display name, avatar, XP, level.
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Admin update of display name and the admin flag.
    async fn update_account(
        &self,
        id: UserId,
        display_name: &str,
        is_admin: bool,
    ) -> Result<User, DomainError>;

    /// Deletes the account and all of its progress rows.
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;

    /// Top accounts by XP for the leaderboard.
    async fn top_by_xp(&self, limit: u32) -> Result<Vec<User>, DomainError>;
}

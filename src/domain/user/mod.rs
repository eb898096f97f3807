//! User aggregate and account value rules.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::progress::level_for_xp;

/// Avatar key assigned to accounts that never picked one.
pub const DEFAULT_AVATAR_KEY: &str = "robot_coral";

/// A registered account with accumulated XP and level.
///
/// Rows are hydrated via [`User::reconstitute`]; new accounts are described
/// by [`NewUser`] and receive their id from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    email: String,
    display_name: String,
    avatar_key: String,
    total_xp: i64,
    level: i64,
    is_admin: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    /// Rebuilds a user from persisted state. No validation is re-run; the
    /// database row is the source of truth.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        email: String,
        display_name: String,
        avatar_key: String,
        total_xp: i64,
        level: i64,
        is_admin: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            avatar_key,
            total_xp,
            level,
            is_admin,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn avatar_key(&self) -> &str {
        &self.avatar_key
    }

    pub fn total_xp(&self) -> i64 {
        self.total_xp
    }

    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Adds XP and recomputes the level. Returns the new total.
    pub fn award_xp(&mut self, xp: i64) -> i64 {
        self.total_xp += xp.max(0);
        self.level = level_for_xp(self.total_xp);
        self.updated_at = Timestamp::now();
        self.total_xp
    }

    /// Updates profile fields after validating them.
    pub fn update_profile(
        &mut self,
        display_name: Option<String>,
        avatar_key: Option<String>,
    ) -> Result<(), ValidationError> {
        if let Some(name) = display_name {
            validate_display_name(&name)?;
            self.display_name = name;
        }
        if let Some(key) = avatar_key {
            validate_avatar_key(&key)?;
            self.avatar_key = key;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

/// Data for an account that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub avatar_key: String,
}

impl NewUser {
    /// Validates registration input and builds the insertable record.
    ///
    /// The password itself is hashed by the caller; only the hash is stored.
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_lowercase();
        let display_name = display_name.into().trim().to_string();
        validate_email(&email)?;
        validate_display_name(&display_name)?;

        Ok(Self {
            email,
            password_hash: password_hash.into(),
            display_name,
            avatar_key: DEFAULT_AVATAR_KEY.to_string(),
        })
    }
}

/// Leaderboard entry: public subset of a user ranked by XP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: UserId,
    pub display_name: String,
    pub avatar_key: String,
    pub total_xp: i64,
    pub level: i64,
}

/// Checks an email address for the minimal shape the app relies on.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::invalid_format("email", "missing @"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(ValidationError::invalid_format(
            "email",
            "expected local@domain.tld",
        ));
    }
    Ok(())
}

/// Passwords must carry at least 8 characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty_field("password"));
    }
    if password.len() < 8 {
        return Err(ValidationError::out_of_range(
            "password",
            8,
            128,
            password.len() as i64,
        ));
    }
    if password.len() > 128 {
        return Err(ValidationError::out_of_range(
            "password",
            8,
            128,
            password.len() as i64,
        ));
    }
    Ok(())
}

/// Display names are 1..=50 characters after trimming.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("display_name"));
    }
    if trimmed.chars().count() > 50 {
        return Err(ValidationError::out_of_range(
            "display_name",
            1,
            50,
            trimmed.chars().count() as i64,
        ));
    }
    Ok(())
}

/// Avatar keys are lowercase identifiers like `robot_coral`.
pub fn validate_avatar_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::empty_field("avatar_key"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ValidationError::invalid_format(
            "avatar_key",
            "lowercase letters, digits and underscores only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::reconstitute(
            UserId::new(1),
            "alice@example.com".to_string(),
            "Alice".to_string(),
            DEFAULT_AVATAR_KEY.to_string(),
            0,
            1,
            false,
            Timestamp::now(),
            Timestamp::now(),
        )
    }

    #[test]
    fn new_user_normalizes_email() {
        let user = NewUser::new("  Alice@Example.COM ", "hash", "Alice").unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.avatar_key, DEFAULT_AVATAR_KEY);
    }

    #[test]
    fn new_user_rejects_bad_email() {
        assert!(NewUser::new("not-an-email", "hash", "Alice").is_err());
        assert!(NewUser::new("a@b", "hash", "Alice").is_err());
        assert!(NewUser::new("", "hash", "Alice").is_err());
    }

    #[test]
    fn new_user_rejects_blank_display_name() {
        assert!(NewUser::new("alice@example.com", "hash", "   ").is_err());
    }

    #[test]
    fn award_xp_recomputes_level() {
        let mut user = sample_user();
        user.award_xp(250);
        assert_eq!(user.total_xp(), 250);
        assert_eq!(user.level(), 3);
    }

    #[test]
    fn award_xp_ignores_negative_amounts() {
        let mut user = sample_user();
        user.award_xp(-50);
        assert_eq!(user.total_xp(), 0);
        assert_eq!(user.level(), 1);
    }

    #[test]
    fn update_profile_validates_avatar_key() {
        let mut user = sample_user();
        assert!(user
            .update_profile(None, Some("Robot Coral".to_string()))
            .is_err());
        assert!(user
            .update_profile(None, Some("robot_teal".to_string()))
            .is_ok());
        assert_eq!(user.avatar_key(), "robot_teal");
    }

    #[test]
    fn password_length_is_enforced() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough1").is_ok());
        assert!(validate_password(&"x".repeat(200)).is_err());
    }
}

//! SQLite implementation of the UserRepository port.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{NewUser, User};
use crate::ports::UserRepository;

use super::{db_error, decode_timestamp, encode_timestamp, is_unique_violation};

const USER_COLUMNS: &str =
    "id, email, password_hash, display_name, avatar_key, total_xp, level, is_admin, \
     created_at, updated_at";

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &SqliteRow) -> Result<User, DomainError> {
        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| db_error("read user row", e))?;
        let updated_at: String = row
            .try_get("updated_at")
            .map_err(|e| db_error("read user row", e))?;
        Ok(User::reconstitute(
            UserId::new(row.try_get("id").map_err(|e| db_error("read user row", e))?),
            row.try_get("email")
                .map_err(|e| db_error("read user row", e))?,
            row.try_get("display_name")
                .map_err(|e| db_error("read user row", e))?,
            row.try_get("avatar_key")
                .map_err(|e| db_error("read user row", e))?,
            row.try_get("total_xp")
                .map_err(|e| db_error("read user row", e))?,
            row.try_get("level")
                .map_err(|e| db_error("read user row", e))?,
            row.try_get("is_admin")
                .map_err(|e| db_error("read user row", e))?,
            decode_timestamp(&created_at)?,
            decode_timestamp(&updated_at)?,
        ))
    }

    async fn fetch_by_email(&self, email: &str) -> Result<Option<SqliteRow>, DomainError> {
        sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch user by email", e))
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let now = encode_timestamp(Timestamp::now());
        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, display_name, avatar_key, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.display_name)
        .bind(&new_user.avatar_key)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::new(
                    ErrorCode::EmailTaken,
                    "An account with this email already exists",
                ));
            }
            Err(e) => return Err(db_error("insert user", e)),
        };

        self.find_by_id(UserId::new(id)).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::DatabaseError, "Inserted user row not found")
        })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch user", e))?;
        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = self.fetch_by_email(email).await?;
        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, DomainError> {
        let Some(row) = self.fetch_by_email(email).await? else {
            return Ok(None);
        };
        let user = Self::row_to_user(&row)?;
        let hash: String = row
            .try_get("password_hash")
            .map_err(|e| db_error("read user row", e))?;
        Ok(Some((user, hash)))
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list users", e))?;
        rows.iter().map(Self::row_to_user).collect()
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE users SET display_name = ?, avatar_key = ?, total_xp = ?, level = ?,
                              updated_at = ?
             WHERE id = ?",
        )
        .bind(user.display_name())
        .bind(user.avatar_key())
        .bind(user.total_xp())
        .bind(user.level())
        .bind(encode_timestamp(user.updated_at()))
        .bind(user.id().as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update user", e))?;
        Ok(())
    }

    async fn update_account(
        &self,
        id: UserId,
        display_name: &str,
        is_admin: bool,
    ) -> Result<User, DomainError> {
        let done = sqlx::query(
            "UPDATE users SET display_name = ?, is_admin = ?, updated_at = ? WHERE id = ?",
        )
        .bind(display_name)
        .bind(is_admin)
        .bind(encode_timestamp(Timestamp::now()))
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update account", e))?;

        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, "User"));
        }
        self.find_by_id(id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::UserNotFound, "User")
        })
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let done = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete user", e))?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, "User"));
        }
        Ok(())
    }

    async fn top_by_xp(&self, limit: u32) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY total_xp DESC, id ASC LIMIT ?",
            USER_COLUMNS
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch leaderboard", e))?;
        rows.iter().map(Self::row_to_user).collect()
    }
}

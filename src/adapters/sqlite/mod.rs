//! SQLite adapters - repository implementations over a single database file.

mod catalog_repository;
mod maintenance;
mod progress_repository;
pub mod schema;
mod support_repository;
mod user_repository;

pub use catalog_repository::SqliteCatalogRepository;
pub use maintenance::SqliteMaintenanceStore;
pub use progress_repository::SqliteProgressRepository;
pub use support_repository::SqliteSupportRepository;
pub use user_repository::SqliteUserRepository;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens the connection pool, creating the database file when configured to.
///
/// Foreign keys are enforced on every connection; SQLite leaves them off by
/// default.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| db_error("parse database url", e))?
        .create_if_missing(config.create_if_missing)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await
        .map_err(|e| db_error("open database", e))
}

/// Maps an sqlx error to a DomainError, tagging the failed operation.
pub(crate) fn db_error(operation: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", operation, e),
    )
}

/// True when the error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|d| d.is_unique_violation())
        .unwrap_or(false)
}

/// Timestamps are stored as RFC 3339 TEXT columns.
pub(crate) fn encode_timestamp(ts: crate::domain::foundation::Timestamp) -> String {
    ts.to_rfc3339()
}

pub(crate) fn decode_timestamp(
    raw: &str,
) -> Result<crate::domain::foundation::Timestamp, DomainError> {
    use chrono::{DateTime, Utc};
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| crate::domain::foundation::Timestamp::from_datetime(dt.with_timezone(&Utc)))
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Malformed timestamp column '{}': {}", raw, e),
            )
        })
}

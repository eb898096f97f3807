//! Database schema, applied idempotently at startup.
//!
//! The application manages its own tables with CREATE TABLE IF NOT EXISTS
//! rather than numbered migrations; the deployment is a single SQLite file
//! and the schema only ever grows.

use sqlx::SqlitePool;

use crate::domain::foundation::DomainError;

use super::db_error;

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        display_name TEXT NOT NULL,
        avatar_key TEXT NOT NULL DEFAULT 'robot_coral',
        total_xp INTEGER NOT NULL DEFAULT 0,
        level INTEGER NOT NULL DEFAULT 1,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS modules (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL,
        description TEXT,
        order_index INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS sections (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        module_id INTEGER NOT NULL REFERENCES modules(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        display_name TEXT NOT NULL,
        description TEXT,
        order_index INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        UNIQUE(module_id, name),
        UNIQUE(module_id, order_index)
    )",
    "CREATE TABLE IF NOT EXISTS questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        section_id INTEGER NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
        question_text TEXT NOT NULL,
        options TEXT NOT NULL,
        correct_answer TEXT NOT NULL,
        explanation TEXT NOT NULL,
        question_type TEXT NOT NULL DEFAULT 'multiple_choice',
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS learning_content (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        section_id INTEGER NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
        screen_title TEXT NOT NULL,
        content_markdown TEXT NOT NULL,
        read_time_min INTEGER NOT NULL DEFAULT 1,
        order_index INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS user_progress (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        question_id INTEGER NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
        is_correct INTEGER NOT NULL,
        selected_answer TEXT,
        xp_awarded INTEGER NOT NULL DEFAULT 0,
        answered_at TEXT NOT NULL,
        UNIQUE(user_id, question_id)
    )",
    "CREATE TABLE IF NOT EXISTS section_completions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        section_id INTEGER NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
        score INTEGER NOT NULL,
        total_questions INTEGER NOT NULL,
        percentage REAL NOT NULL,
        completed_at TEXT NOT NULL,
        UNIQUE(user_id, section_id)
    )",
    "CREATE TABLE IF NOT EXISTS section_learning (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        section_id INTEGER NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
        learned_at TEXT NOT NULL,
        UNIQUE(user_id, section_id)
    )",
    "CREATE TABLE IF NOT EXISTS content_progress (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        content_id INTEGER NOT NULL REFERENCES learning_content(id) ON DELETE CASCADE,
        completed_at TEXT NOT NULL,
        UNIQUE(user_id, content_id)
    )",
    "CREATE TABLE IF NOT EXISTS support_tickets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_sections_module ON sections(module_id)",
    "CREATE INDEX IF NOT EXISTS idx_questions_section ON questions(section_id)",
    "CREATE INDEX IF NOT EXISTS idx_content_section ON learning_content(section_id)",
    "CREATE INDEX IF NOT EXISTS idx_progress_user ON user_progress(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_completions_user ON section_completions(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_users_xp ON users(total_xp)",
];

/// Creates every table and index the application needs. Safe to call on
/// every startup.
pub async fn apply(pool: &SqlitePool) -> Result<(), DomainError> {
    for ddl in TABLES.iter().chain(INDEXES) {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| db_error("apply schema", e))?;
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_is_idempotent() {
        let pool = test_support::memory_pool().await;
        apply(&pool).await.expect("second apply succeeds");
    }

    #[tokio::test]
    async fn users_email_is_unique() {
        let pool = test_support::memory_pool().await;
        let insert = "INSERT INTO users (email, password_hash, display_name, created_at, updated_at)
                      VALUES ('a@b.co', 'h', 'A', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')";
        sqlx::query(insert).execute(&pool).await.unwrap();
        assert!(sqlx::query(insert).execute(&pool).await.is_err());
    }
}

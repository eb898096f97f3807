//! SQLite implementation of the SupportRepository port.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::foundation::{DomainError, TicketId, Timestamp, UserId};
use crate::ports::{NewTicket, SupportRepository, SupportTicket};

use super::{db_error, decode_timestamp, encode_timestamp};

pub struct SqliteSupportRepository {
    pool: SqlitePool,
}

impl SqliteSupportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Public reference code shown to the submitter, derived from the row id.
    fn reference_for(id: i64) -> String {
        format!("SB-{:06}", id)
    }

    fn row_to_ticket(row: &SqliteRow) -> Result<SupportTicket, DomainError> {
        let id: i64 = row.try_get("id").map_err(|e| db_error("read ticket row", e))?;
        let user_id: Option<i64> = row
            .try_get("user_id")
            .map_err(|e| db_error("read ticket row", e))?;
        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| db_error("read ticket row", e))?;
        Ok(SupportTicket {
            id: TicketId::new(id),
            reference: Self::reference_for(id),
            user_id: user_id.map(UserId::new),
            subject: row
                .try_get("subject")
                .map_err(|e| db_error("read ticket row", e))?,
            message: row
                .try_get("message")
                .map_err(|e| db_error("read ticket row", e))?,
            created_at: decode_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl SupportRepository for SqliteSupportRepository {
    async fn create(&self, ticket: &NewTicket) -> Result<SupportTicket, DomainError> {
        let now = Timestamp::now();
        let done = sqlx::query(
            "INSERT INTO support_tickets (user_id, subject, message, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(ticket.user_id.map(|id| id.as_i64()))
        .bind(&ticket.subject)
        .bind(&ticket.message)
        .bind(encode_timestamp(now))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert support ticket", e))?;

        let id = done.last_insert_rowid();
        Ok(SupportTicket {
            id: TicketId::new(id),
            reference: Self::reference_for(id),
            user_id: ticket.user_id,
            subject: ticket.subject.clone(),
            message: ticket.message.clone(),
            created_at: now,
        })
    }

    async fn list_all(&self) -> Result<Vec<SupportTicket>, DomainError> {
        let rows = sqlx::query("SELECT * FROM support_tickets ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list support tickets", e))?;
        rows.iter().map(Self::row_to_ticket).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::schema::test_support::memory_pool;

    #[tokio::test]
    async fn anonymous_ticket_roundtrips() {
        let repo = SqliteSupportRepository::new(memory_pool().await);
        let created = repo
            .create(&NewTicket {
                user_id: None,
                subject: "Login broken".to_string(),
                message: "I cannot log in.".to_string(),
            })
            .await
            .unwrap();
        assert!(created.reference.starts_with("SB-"));

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].subject, "Login broken");
        assert!(all[0].user_id.is_none());
        assert_eq!(all[0].reference, created.reference);
    }

    #[tokio::test]
    async fn tickets_list_newest_first() {
        let repo = SqliteSupportRepository::new(memory_pool().await);
        for subject in ["first", "second"] {
            repo.create(&NewTicket {
                user_id: None,
                subject: subject.to_string(),
                message: "msg".to_string(),
            })
            .await
            .unwrap();
        }
        let all = repo.list_all().await.unwrap();
        assert_eq!(all[0].subject, "second");
        assert_eq!(all[1].subject, "first");
    }
}

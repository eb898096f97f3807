//! SupportRepository port - support ticket persistence.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, TicketId, Timestamp, UserId};

/// A submitted support request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: TicketId,
    /// Public reference code handed back to the submitter.
    pub reference: String,
    pub user_id: Option<UserId>,
    pub subject: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// A support request that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub user_id: Option<UserId>,
    pub subject: String,
    pub message: String,
}

/// Persistence contract for support tickets.
#[async_trait]
pub trait SupportRepository: Send + Sync {
    async fn create(&self, ticket: &NewTicket) -> Result<SupportTicket, DomainError>;

    /// All tickets, newest first, for the admin view.
    async fn list_all(&self) -> Result<Vec<SupportTicket>, DomainError>;
}

//! MarkSectionLearnedHandler - records that a user walked a section's
//! learning content.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SectionId, UserId};
use crate::ports::{CatalogRepository, ProgressRepository};

/// Command to mark a section learned.
#[derive(Debug, Clone)]
pub struct MarkSectionLearnedCommand {
    pub user_id: UserId,
    pub section_id: SectionId,
}

/// Handler for the learn marker. Idempotent.
pub struct MarkSectionLearnedHandler {
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl MarkSectionLearnedHandler {
    pub fn new(catalog: Arc<dyn CatalogRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { catalog, progress }
    }

    pub async fn handle(&self, cmd: MarkSectionLearnedCommand) -> Result<(), DomainError> {
        self.catalog
            .find_section(cmd.section_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::SectionNotFound, "Section"))?;
        self.progress.mark_learned(cmd.user_id, cmd.section_id).await
    }
}

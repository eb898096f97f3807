//! Maintenance commands wrapping the repair store.
//!
//! Thin by design: each operation logs what it changed so repairs leave an
//! audit trail in the server log.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::DomainError;
use crate::ports::{DedupeOutcome, MaintenanceReport, MaintenanceStore};

/// Handler for database repair operations.
pub struct MaintenanceHandler {
    store: Arc<dyn MaintenanceStore>,
}

impl MaintenanceHandler {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    pub async fn report(&self) -> Result<MaintenanceReport, DomainError> {
        let report = self.store.report().await?;
        if !report.duplicate_sections.is_empty() || !report.drifted_users.is_empty() {
            warn!(
                duplicate_groups = report.duplicate_sections.len(),
                drifted_users = report.drifted_users.len(),
                orphaned_questions = report.orphaned_questions,
                stale_completions = report.stale_completions,
                "maintenance report found inconsistencies"
            );
        }
        Ok(report)
    }

    pub async fn dedupe_sections(&self) -> Result<DedupeOutcome, DomainError> {
        let outcome = self.store.dedupe_sections().await?;
        info!(
            groups = outcome.groups_collapsed,
            removed = outcome.sections_removed,
            repointed = outcome.questions_repointed,
            "section dedupe finished"
        );
        Ok(outcome)
    }

    pub async fn rebuild_completions(&self) -> Result<u64, DomainError> {
        let written = self.store.rebuild_completions().await?;
        info!(written, "completion rebuild finished");
        Ok(written)
    }

    pub async fn reconcile_xp(&self) -> Result<u64, DomainError> {
        let corrected = self.store.reconcile_xp().await?;
        info!(corrected, "xp reconciliation finished");
        Ok(corrected)
    }
}

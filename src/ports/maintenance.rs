//! MaintenanceStore port - schema-drift repair operations.
//!
//! The original deployment accumulated one-off repair scripts that each
//! re-derived the completion rules by hand. This port names the repairs
//! once; the sqlite adapter implements them through `domain::progress`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ModuleId, SectionId, UserId};

/// Sections sharing a (module, name) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateSectionGroup {
    pub module_id: ModuleId,
    pub name: String,
    /// The section kept (lowest id).
    pub survivor: SectionId,
    /// The duplicates to collapse into the survivor.
    pub duplicates: Vec<SectionId>,
}

/// A user whose stored XP or level disagrees with their progress rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftedUser {
    pub user_id: UserId,
    pub stored_xp: i64,
    pub derived_xp: i64,
    pub stored_level: i64,
    pub derived_level: i64,
}

/// Snapshot of everything the repair operations would touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub duplicate_sections: Vec<DuplicateSectionGroup>,
    /// Questions whose section no longer exists.
    pub orphaned_questions: u64,
    /// Completion rows whose stored score disagrees with the answer rows.
    pub stale_completions: u64,
    pub drifted_users: Vec<DriftedUser>,
}

/// Result of a dedupe pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupeOutcome {
    pub groups_collapsed: u32,
    pub sections_removed: u32,
    pub questions_repointed: u64,
}

/// Contract for database repair operations (admin-only surface).
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    /// Inspects the database without modifying it.
    async fn report(&self) -> Result<MaintenanceReport, DomainError>;

    /// Collapses duplicate (module, name) sections, repointing questions,
    /// content, and progress rows to the surviving section.
    async fn dedupe_sections(&self) -> Result<DedupeOutcome, DomainError>;

    /// Re-derives `section_completions` from answer rows. Returns the
    /// number of rows written.
    async fn rebuild_completions(&self) -> Result<u64, DomainError>;

    /// Recomputes each user's XP total from progress rows and the level
    /// from the XP total. Returns the number of users corrected.
    async fn reconcile_xp(&self) -> Result<u64, DomainError>;
}

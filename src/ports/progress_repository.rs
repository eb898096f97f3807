//! ProgressRepository port - answers, completions, and learn markers.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContentId, DomainError, ModuleId, QuestionId, SectionId, Timestamp, UserId,
};
use crate::domain::progress::{CompletionRecord, SectionScore, SectionStatus};

/// A persisted answer row (one per user/question pair).
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAnswer {
    pub question_id: QuestionId,
    pub is_correct: bool,
    pub selected_answer: Option<String>,
    pub xp_awarded: i64,
    pub answered_at: Timestamp,
}

/// Aggregate counters shown on the user stats page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub questions_answered: u32,
    pub questions_correct: u32,
    pub sections_completed: u32,
    pub sections_learned: u32,
}

/// Persistence contract for user progress state.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn find_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<StoredAnswer>, DomainError>;

    /// Inserts or replaces the answer row for a user/question pair.
    async fn upsert_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        is_correct: bool,
        selected_answer: &str,
        xp_awarded: i64,
    ) -> Result<(), DomainError>;

    async fn answers_for_section(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<Vec<StoredAnswer>, DomainError>;

    /// Tallies the user's score over the section's current question set.
    async fn section_score(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<SectionScore, DomainError>;

    async fn upsert_completion(
        &self,
        user_id: UserId,
        section_id: SectionId,
        completion: &CompletionRecord,
    ) -> Result<(), DomainError>;

    async fn find_completion(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<Option<CompletionRecord>, DomainError>;

    /// Marks the section's learning flow finished. Idempotent.
    async fn mark_learned(&self, user_id: UserId, section_id: SectionId)
        -> Result<(), DomainError>;

    async fn is_learned(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<bool, DomainError>;

    /// Marks one learning content screen finished. Idempotent.
    async fn mark_content_complete(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<(), DomainError>;

    /// Ids of the section's content screens the user has finished.
    async fn completed_content_ids(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<Vec<ContentId>, DomainError>;

    /// Per-section status for every section of a module.
    async fn section_statuses_for_module(
        &self,
        user_id: UserId,
        module_id: ModuleId,
    ) -> Result<HashMap<SectionId, SectionStatus>, DomainError>;

    /// Completed-section counts per module, for the module overview.
    async fn completed_section_counts(
        &self,
        user_id: UserId,
    ) -> Result<HashMap<ModuleId, u32>, DomainError>;

    async fn user_stats(&self, user_id: UserId) -> Result<UserStats, DomainError>;
}

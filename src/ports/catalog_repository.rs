//! CatalogRepository port - course content persistence.

use async_trait::async_trait;

use crate::domain::catalog::{LearningContent, Module, Question, QuestionOptions, Section};
use crate::domain::foundation::{ContentId, DomainError, ModuleId, QuestionId, SectionId};

/// Fields of a module create/update request.
#[derive(Debug, Clone)]
pub struct ModuleDraft {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub order_index: i64,
}

/// Fields of a section create/update request.
#[derive(Debug, Clone)]
pub struct SectionDraft {
    pub module_id: ModuleId,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub order_index: i64,
}

/// Fields of a question create/update request.
#[derive(Debug, Clone)]
pub struct QuestionDraft {
    pub section_id: SectionId,
    pub question_text: String,
    pub options: QuestionOptions,
    pub correct_answer: String,
    pub explanation: String,
}

/// Persistence contract for the course catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_modules(&self) -> Result<Vec<Module>, DomainError>;

    async fn find_module(&self, id: ModuleId) -> Result<Option<Module>, DomainError>;

    async fn sections_for_module(&self, id: ModuleId) -> Result<Vec<Section>, DomainError>;

    async fn find_section(&self, id: SectionId) -> Result<Option<Section>, DomainError>;

    async fn questions_for_section(&self, id: SectionId) -> Result<Vec<Question>, DomainError>;

    async fn find_question(&self, id: QuestionId) -> Result<Option<Question>, DomainError>;

    async fn content_for_section(
        &self,
        id: SectionId,
    ) -> Result<Vec<LearningContent>, DomainError>;

    async fn find_content(&self, id: ContentId) -> Result<Option<LearningContent>, DomainError>;

    // ── Admin content management ────────────────────────────────────────

    /// Fails with `ErrorCode::DuplicateEntry` on a unique-key collision.
    async fn create_module(&self, draft: &ModuleDraft) -> Result<Module, DomainError>;

    async fn update_module(&self, id: ModuleId, draft: &ModuleDraft)
        -> Result<Module, DomainError>;

    /// Deletes the module together with its sections, questions, and content.
    async fn delete_module(&self, id: ModuleId) -> Result<(), DomainError>;

    async fn create_section(&self, draft: &SectionDraft) -> Result<Section, DomainError>;

    async fn update_section(
        &self,
        id: SectionId,
        draft: &SectionDraft,
    ) -> Result<Section, DomainError>;

    async fn delete_section(&self, id: SectionId) -> Result<(), DomainError>;

    async fn create_question(&self, draft: &QuestionDraft) -> Result<Question, DomainError>;

    async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> Result<Question, DomainError>;

    async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError>;
}

//! CompleteSectionHandler - turns a fully answered quiz into a completion row.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, SectionId, UserId};
use crate::domain::progress::{CompletionRecord, SectionScore};
use crate::ports::{CatalogRepository, ProgressRepository};

/// Command to complete a section's quiz.
#[derive(Debug, Clone)]
pub struct CompleteSectionCommand {
    pub user_id: UserId,
    pub section_id: SectionId,
}

/// The completion written for the user, with the score it was derived from.
#[derive(Debug, Clone)]
pub struct CompleteSectionResult {
    pub completion: CompletionRecord,
    pub score: SectionScore,
}

/// Handler for section completion.
///
/// The score is always re-derived from the stored answers; the client never
/// supplies its own numbers.
pub struct CompleteSectionHandler {
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl CompleteSectionHandler {
    pub fn new(catalog: Arc<dyn CatalogRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { catalog, progress }
    }

    pub async fn handle(
        &self,
        cmd: CompleteSectionCommand,
    ) -> Result<CompleteSectionResult, DomainError> {
        self.catalog
            .find_section(cmd.section_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::SectionNotFound, "Section"))?;

        let score = self
            .progress
            .section_score(cmd.user_id, cmd.section_id)
            .await?;

        let Some(completion) = score.completion() else {
            return Err(DomainError::new(
                ErrorCode::SectionIncomplete,
                "Answer every question in the section before completing it",
            )
            .with_detail("answered", score.answered.to_string())
            .with_detail("total_questions", score.total_questions.to_string()));
        };

        self.progress
            .upsert_completion(cmd.user_id, cmd.section_id, &completion)
            .await?;
        info!(
            user_id = %cmd.user_id,
            section_id = %cmd.section_id,
            score = completion.score,
            total = completion.total_questions,
            "section completed"
        );

        Ok(CompleteSectionResult { completion, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockCatalogRepository, MockProgressRepository,
    };
    use crate::domain::foundation::{QuestionId, Timestamp};

    const SECTION: SectionId = SectionId::new(5);
    const USER: UserId = UserId::new(1);

    fn section() -> crate::domain::catalog::Section {
        crate::domain::catalog::Section::reconstitute(
            SECTION,
            crate::domain::foundation::ModuleId::new(1),
            "basics".to_string(),
            "Basics".to_string(),
            None,
            1,
            Timestamp::now(),
        )
    }

    fn fixture(question_ids: &[i64]) -> (CompleteSectionHandler, Arc<MockProgressRepository>) {
        let catalog = Arc::new(MockCatalogRepository::new().with_section(section()));
        let mut progress = MockProgressRepository::new();
        for id in question_ids {
            progress = progress.with_question(QuestionId::new(*id), SECTION);
        }
        let progress = Arc::new(progress);
        (
            CompleteSectionHandler::new(catalog, progress.clone()),
            progress,
        )
    }

    fn command() -> CompleteSectionCommand {
        CompleteSectionCommand {
            user_id: USER,
            section_id: SECTION,
        }
    }

    #[tokio::test]
    async fn fully_answered_section_writes_a_completion() {
        let (handler, progress) = fixture(&[1, 2]);
        progress
            .upsert_answer(USER, QuestionId::new(1), true, "a", 10)
            .await
            .unwrap();
        progress
            .upsert_answer(USER, QuestionId::new(2), false, "b", 0)
            .await
            .unwrap();

        let result = handler.handle(command()).await.unwrap();
        assert_eq!(result.completion.score, 1);
        assert_eq!(result.completion.total_questions, 2);
        assert!((result.completion.percentage - 50.0).abs() < f64::EPSILON);

        let stored = progress.find_completion(USER, SECTION).await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn unanswered_questions_block_completion() {
        let (handler, progress) = fixture(&[1, 2]);
        progress
            .upsert_answer(USER, QuestionId::new(1), true, "a", 10)
            .await
            .unwrap();

        let err = handler.handle(command()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionIncomplete);
        assert_eq!(err.details.get("answered"), Some(&"1".to_string()));
        assert_eq!(err.details.get("total_questions"), Some(&"2".to_string()));
        assert!(progress.find_completion(USER, SECTION).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_section_can_never_be_completed() {
        let (handler, _) = fixture(&[]);
        let err = handler.handle(command()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionIncomplete);
    }

    #[tokio::test]
    async fn retake_upserts_the_stored_row() {
        let (handler, progress) = fixture(&[1]);
        progress
            .upsert_answer(USER, QuestionId::new(1), false, "b", 0)
            .await
            .unwrap();
        handler.handle(command()).await.unwrap();

        progress
            .upsert_answer(USER, QuestionId::new(1), true, "a", 10)
            .await
            .unwrap();
        let retake = handler.handle(command()).await.unwrap();
        assert_eq!(retake.completion.score, 1);

        let stored = progress
            .find_completion(USER, SECTION)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.score, 1);
    }

    #[tokio::test]
    async fn unknown_section_is_not_found() {
        let catalog = Arc::new(MockCatalogRepository::new());
        let handler = CompleteSectionHandler::new(catalog, Arc::new(MockProgressRepository::new()));
        let err = handler.handle(command()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionNotFound);
    }
}

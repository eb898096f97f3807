//! SubmitAnswerHandler - grades an answer, records it, and awards XP.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, UserId};
use crate::domain::progress::{AnswerRecord, SectionScore, XpPolicy};
use crate::ports::{CatalogRepository, ProgressRepository, UserRepository};

/// Command to submit an answer to a quiz question.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub selected_answer: String,
}

/// Outcome returned to the client after grading.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
    /// XP granted by this submission (0 on re-answers and wrong answers).
    pub xp_awarded: i64,
    pub total_xp: i64,
    pub level: i64,
    /// The user's score over the question's section after this answer.
    pub section_score: SectionScore,
}

/// Handler for answer submission.
pub struct SubmitAnswerHandler {
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
    users: Arc<dyn UserRepository>,
    xp_policy: XpPolicy,
}

impl SubmitAnswerHandler {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        progress: Arc<dyn ProgressRepository>,
        users: Arc<dyn UserRepository>,
        xp_policy: XpPolicy,
    ) -> Self {
        Self {
            catalog,
            progress,
            users,
            xp_policy,
        }
    }

    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<SubmitAnswerResult, DomainError> {
        let question = self
            .catalog
            .find_question(cmd.question_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::QuestionNotFound, "Question"))?;

        if !question.accepts(&cmd.selected_answer) {
            return Err(DomainError::validation(
                "selected_answer",
                "Selected answer is not one of the question's options",
            ));
        }

        let outcome = question.grade(&cmd.selected_answer);

        let previous = self
            .progress
            .find_answer(cmd.user_id, cmd.question_id)
            .await?
            .map(|a| AnswerRecord {
                is_correct: a.is_correct,
                xp_awarded: a.xp_awarded,
            });
        let xp_awarded = self.xp_policy.xp_for_answer(outcome.is_correct, previous.as_ref());

        self.progress
            .upsert_answer(
                cmd.user_id,
                cmd.question_id,
                outcome.is_correct,
                &cmd.selected_answer,
                xp_awarded,
            )
            .await?;

        let mut user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User"))?;
        if xp_awarded > 0 {
            user.award_xp(xp_awarded);
            self.users.update(&user).await?;
            debug!(
                user_id = %cmd.user_id,
                question_id = %cmd.question_id,
                xp_awarded,
                total_xp = user.total_xp(),
                "awarded xp"
            );
        }

        let section_score = self
            .progress
            .section_score(cmd.user_id, question.section_id())
            .await?;

        Ok(SubmitAnswerResult {
            is_correct: outcome.is_correct,
            correct_answer: outcome.correct_answer,
            explanation: outcome.explanation,
            xp_awarded,
            total_xp: user.total_xp(),
            level: user.level(),
            section_score,
        })
    }
}

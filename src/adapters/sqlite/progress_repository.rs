//! SQLite implementation of the ProgressRepository port.
//!
//! Scores are tallied in SQL but always shaped through `domain::progress`
//! types, so the completion rules live in exactly one place.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::foundation::{
    ContentId, DomainError, ModuleId, QuestionId, SectionId, Timestamp, UserId,
};
use crate::domain::progress::{CompletionRecord, SectionScore, SectionStatus};
use crate::ports::{ProgressRepository, StoredAnswer, UserStats};

use super::{db_error, decode_timestamp, encode_timestamp};

pub struct SqliteProgressRepository {
    pool: SqlitePool,
}

impl SqliteProgressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_answer(row: &SqliteRow) -> Result<StoredAnswer, DomainError> {
        let answered_at: String = row
            .try_get("answered_at")
            .map_err(|e| db_error("read progress row", e))?;
        Ok(StoredAnswer {
            question_id: QuestionId::new(
                row.try_get("question_id")
                    .map_err(|e| db_error("read progress row", e))?,
            ),
            is_correct: row
                .try_get("is_correct")
                .map_err(|e| db_error("read progress row", e))?,
            selected_answer: row
                .try_get("selected_answer")
                .map_err(|e| db_error("read progress row", e))?,
            xp_awarded: row
                .try_get("xp_awarded")
                .map_err(|e| db_error("read progress row", e))?,
            answered_at: decode_timestamp(&answered_at)?,
        })
    }

    fn clamped_score(total: i64, answered: i64, correct: i64) -> SectionScore {
        let total = total.max(0) as u32;
        let answered = (answered.max(0) as u32).min(total);
        let correct = (correct.max(0) as u32).min(answered);
        SectionScore {
            total_questions: total,
            answered,
            correct,
        }
    }
}

#[async_trait]
impl ProgressRepository for SqliteProgressRepository {
    async fn find_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<StoredAnswer>, DomainError> {
        let row = sqlx::query(
            "SELECT question_id, is_correct, selected_answer, xp_awarded, answered_at
             FROM user_progress WHERE user_id = ? AND question_id = ?",
        )
        .bind(user_id.as_i64())
        .bind(question_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch answer", e))?;
        row.as_ref().map(Self::row_to_answer).transpose()
    }

    async fn upsert_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        is_correct: bool,
        selected_answer: &str,
        xp_awarded: i64,
    ) -> Result<(), DomainError> {
        // xp_awarded keeps the lifetime award for the pair so a re-answer
        // can never trigger a second payout.
        sqlx::query(
            "INSERT INTO user_progress (user_id, question_id, is_correct, selected_answer,
                                        xp_awarded, answered_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id, question_id) DO UPDATE SET
                 is_correct = excluded.is_correct,
                 selected_answer = excluded.selected_answer,
                 xp_awarded = MAX(user_progress.xp_awarded, excluded.xp_awarded),
                 answered_at = excluded.answered_at",
        )
        .bind(user_id.as_i64())
        .bind(question_id.as_i64())
        .bind(is_correct)
        .bind(selected_answer)
        .bind(xp_awarded)
        .bind(encode_timestamp(Timestamp::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("upsert answer", e))?;
        Ok(())
    }

    async fn answers_for_section(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<Vec<StoredAnswer>, DomainError> {
        let rows = sqlx::query(
            "SELECT up.question_id, up.is_correct, up.selected_answer, up.xp_awarded,
                    up.answered_at
             FROM user_progress up
             JOIN questions q ON q.id = up.question_id
             WHERE up.user_id = ? AND q.section_id = ?
             ORDER BY up.question_id ASC",
        )
        .bind(user_id.as_i64())
        .bind(section_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list section answers", e))?;
        rows.iter().map(Self::row_to_answer).collect()
    }

    async fn section_score(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<SectionScore, DomainError> {
        let row = sqlx::query(
            "SELECT
                 (SELECT COUNT(*) FROM questions WHERE section_id = ?) AS total,
                 COUNT(up.id) AS answered,
                 COALESCE(SUM(up.is_correct), 0) AS correct
             FROM user_progress up
             JOIN questions q ON q.id = up.question_id
             WHERE up.user_id = ? AND q.section_id = ?",
        )
        .bind(section_id.as_i64())
        .bind(user_id.as_i64())
        .bind(section_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("tally section score", e))?;

        let total: i64 = row.try_get("total").map_err(|e| db_error("tally section score", e))?;
        let answered: i64 = row
            .try_get("answered")
            .map_err(|e| db_error("tally section score", e))?;
        let correct: i64 = row
            .try_get("correct")
            .map_err(|e| db_error("tally section score", e))?;
        Ok(Self::clamped_score(total, answered, correct))
    }

    async fn upsert_completion(
        &self,
        user_id: UserId,
        section_id: SectionId,
        completion: &CompletionRecord,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO section_completions (user_id, section_id, score, total_questions,
                                              percentage, completed_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id, section_id) DO UPDATE SET
                 score = excluded.score,
                 total_questions = excluded.total_questions,
                 percentage = excluded.percentage,
                 completed_at = excluded.completed_at",
        )
        .bind(user_id.as_i64())
        .bind(section_id.as_i64())
        .bind(completion.score as i64)
        .bind(completion.total_questions as i64)
        .bind(completion.percentage)
        .bind(encode_timestamp(Timestamp::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("upsert completion", e))?;
        Ok(())
    }

    async fn find_completion(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<Option<CompletionRecord>, DomainError> {
        let row = sqlx::query(
            "SELECT score, total_questions, percentage FROM section_completions
             WHERE user_id = ? AND section_id = ?",
        )
        .bind(user_id.as_i64())
        .bind(section_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch completion", e))?;

        row.map(|row| {
            let score: i64 = row
                .try_get("score")
                .map_err(|e| db_error("read completion row", e))?;
            let total: i64 = row
                .try_get("total_questions")
                .map_err(|e| db_error("read completion row", e))?;
            let percentage: f64 = row
                .try_get("percentage")
                .map_err(|e| db_error("read completion row", e))?;
            Ok(CompletionRecord {
                score: score.max(0) as u32,
                total_questions: total.max(0) as u32,
                percentage,
            })
        })
        .transpose()
    }

    async fn mark_learned(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO section_learning (user_id, section_id, learned_at) VALUES (?, ?, ?)
             ON CONFLICT(user_id, section_id) DO NOTHING",
        )
        .bind(user_id.as_i64())
        .bind(section_id.as_i64())
        .bind(encode_timestamp(Timestamp::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("mark section learned", e))?;
        Ok(())
    }

    async fn is_learned(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT 1 FROM section_learning WHERE user_id = ? AND section_id = ?",
        )
        .bind(user_id.as_i64())
        .bind(section_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("check learned marker", e))?;
        Ok(row.is_some())
    }

    async fn mark_content_complete(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO content_progress (user_id, content_id, completed_at) VALUES (?, ?, ?)
             ON CONFLICT(user_id, content_id) DO NOTHING",
        )
        .bind(user_id.as_i64())
        .bind(content_id.as_i64())
        .bind(encode_timestamp(Timestamp::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("mark content complete", e))?;
        Ok(())
    }

    async fn completed_content_ids(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<Vec<ContentId>, DomainError> {
        let rows = sqlx::query(
            "SELECT cp.content_id
             FROM content_progress cp
             JOIN learning_content lc ON lc.id = cp.content_id
             WHERE cp.user_id = ? AND lc.section_id = ?
             ORDER BY cp.content_id ASC",
        )
        .bind(user_id.as_i64())
        .bind(section_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list completed content", e))?;

        rows.iter()
            .map(|row| {
                row.try_get("content_id")
                    .map(ContentId::new)
                    .map_err(|e| db_error("read content progress row", e))
            })
            .collect()
    }

    async fn section_statuses_for_module(
        &self,
        user_id: UserId,
        module_id: ModuleId,
    ) -> Result<HashMap<SectionId, SectionStatus>, DomainError> {
        let rows = sqlx::query(
            "SELECT s.id AS section_id,
                    (SELECT COUNT(*) FROM questions q WHERE q.section_id = s.id) AS total,
                    (SELECT COUNT(*) FROM user_progress up
                      JOIN questions q ON q.id = up.question_id
                      WHERE up.user_id = ? AND q.section_id = s.id) AS answered,
                    (SELECT COALESCE(SUM(up.is_correct), 0) FROM user_progress up
                      JOIN questions q ON q.id = up.question_id
                      WHERE up.user_id = ? AND q.section_id = s.id) AS correct,
                    EXISTS(SELECT 1 FROM section_learning sl
                           WHERE sl.user_id = ? AND sl.section_id = s.id) AS learned,
                    EXISTS(SELECT 1 FROM section_completions sc
                           WHERE sc.user_id = ? AND sc.section_id = s.id) AS completed
             FROM sections s
             WHERE s.module_id = ?",
        )
        .bind(user_id.as_i64())
        .bind(user_id.as_i64())
        .bind(user_id.as_i64())
        .bind(user_id.as_i64())
        .bind(module_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("tally module statuses", e))?;

        let mut statuses = HashMap::with_capacity(rows.len());
        for row in &rows {
            let section_id: i64 = row
                .try_get("section_id")
                .map_err(|e| db_error("read status row", e))?;
            let total: i64 = row.try_get("total").map_err(|e| db_error("read status row", e))?;
            let answered: i64 = row
                .try_get("answered")
                .map_err(|e| db_error("read status row", e))?;
            let correct: i64 = row
                .try_get("correct")
                .map_err(|e| db_error("read status row", e))?;
            let learned: bool = row
                .try_get("learned")
                .map_err(|e| db_error("read status row", e))?;
            let completed: bool = row
                .try_get("completed")
                .map_err(|e| db_error("read status row", e))?;

            let score = Self::clamped_score(total, answered, correct);
            statuses.insert(
                SectionId::new(section_id),
                SectionStatus::new(score, learned, completed),
            );
        }
        Ok(statuses)
    }

    async fn completed_section_counts(
        &self,
        user_id: UserId,
    ) -> Result<HashMap<ModuleId, u32>, DomainError> {
        let rows = sqlx::query(
            "SELECT s.module_id, COUNT(*) AS completed
             FROM section_completions sc
             JOIN sections s ON s.id = sc.section_id
             WHERE sc.user_id = ?
             GROUP BY s.module_id",
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("tally completed sections", e))?;

        let mut counts = HashMap::with_capacity(rows.len());
        for row in &rows {
            let module_id: i64 = row
                .try_get("module_id")
                .map_err(|e| db_error("read completion count row", e))?;
            let completed: i64 = row
                .try_get("completed")
                .map_err(|e| db_error("read completion count row", e))?;
            counts.insert(ModuleId::new(module_id), completed.max(0) as u32);
        }
        Ok(counts)
    }

    async fn user_stats(&self, user_id: UserId) -> Result<UserStats, DomainError> {
        let row = sqlx::query(
            "SELECT
                 (SELECT COUNT(*) FROM user_progress WHERE user_id = ?) AS answered,
                 (SELECT COALESCE(SUM(is_correct), 0) FROM user_progress
                  WHERE user_id = ?) AS correct,
                 (SELECT COUNT(*) FROM section_completions WHERE user_id = ?) AS completed,
                 (SELECT COUNT(*) FROM section_learning WHERE user_id = ?) AS learned",
        )
        .bind(user_id.as_i64())
        .bind(user_id.as_i64())
        .bind(user_id.as_i64())
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("tally user stats", e))?;

        let answered: i64 = row
            .try_get("answered")
            .map_err(|e| db_error("read stats row", e))?;
        let correct: i64 = row
            .try_get("correct")
            .map_err(|e| db_error("read stats row", e))?;
        let completed: i64 = row
            .try_get("completed")
            .map_err(|e| db_error("read stats row", e))?;
        let learned: i64 = row
            .try_get("learned")
            .map_err(|e| db_error("read stats row", e))?;

        Ok(UserStats {
            questions_answered: answered.max(0) as u32,
            questions_correct: correct.max(0) as u32,
            sections_completed: completed.max(0) as u32,
            sections_learned: learned.max(0) as u32,
        })
    }
}

//! SQLite implementation of the MaintenanceStore port.
//!
//! Repairs run the same completion rules as the live request path: scores
//! flow through `domain::progress` before anything is written back.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::domain::foundation::{DomainError, ModuleId, SectionId, Timestamp, UserId};
use crate::domain::progress::{level_for_xp, SectionScore};
use crate::ports::{
    DedupeOutcome, DriftedUser, DuplicateSectionGroup, MaintenanceReport, MaintenanceStore,
};

use super::{db_error, encode_timestamp};

pub struct SqliteMaintenanceStore {
    pool: SqlitePool,
}

impl SqliteMaintenanceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Sections sharing a (module, name) key, oldest id first. Predates the
    /// UNIQUE constraint; databases created before it can still hold these.
    async fn duplicate_groups(&self) -> Result<Vec<DuplicateSectionGroup>, DomainError> {
        let keys = sqlx::query(
            "SELECT module_id, name FROM sections
             GROUP BY module_id, name HAVING COUNT(*) > 1
             ORDER BY module_id, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("find duplicate sections", e))?;

        let mut groups = Vec::new();
        for key in &keys {
            let module_id: i64 = key
                .try_get("module_id")
                .map_err(|e| db_error("read duplicate key", e))?;
            let name: String = key
                .try_get("name")
                .map_err(|e| db_error("read duplicate key", e))?;

            let ids = sqlx::query(
                "SELECT id FROM sections WHERE module_id = ? AND name = ? ORDER BY id ASC",
            )
            .bind(module_id)
            .bind(&name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list duplicate sections", e))?;

            let mut section_ids = Vec::with_capacity(ids.len());
            for row in &ids {
                let id: i64 = row.try_get("id").map_err(|e| db_error("read section id", e))?;
                section_ids.push(SectionId::new(id));
            }
            let survivor = section_ids[0];
            groups.push(DuplicateSectionGroup {
                module_id: ModuleId::new(module_id),
                name,
                survivor,
                duplicates: section_ids.into_iter().skip(1).collect(),
            });
        }
        Ok(groups)
    }

    async fn drifted_users(&self) -> Result<Vec<DriftedUser>, DomainError> {
        let rows = sqlx::query(
            "SELECT u.id, u.total_xp, u.level,
                    COALESCE((SELECT SUM(up.xp_awarded) FROM user_progress up
                              WHERE up.user_id = u.id), 0) AS derived_xp
             FROM users u ORDER BY u.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("scan user xp", e))?;

        let mut drifted = Vec::new();
        for row in &rows {
            let id: i64 = row.try_get("id").map_err(|e| db_error("read user xp row", e))?;
            let stored_xp: i64 = row
                .try_get("total_xp")
                .map_err(|e| db_error("read user xp row", e))?;
            let stored_level: i64 = row
                .try_get("level")
                .map_err(|e| db_error("read user xp row", e))?;
            let derived_xp: i64 = row
                .try_get("derived_xp")
                .map_err(|e| db_error("read user xp row", e))?;
            let derived_level = level_for_xp(derived_xp);

            if stored_xp != derived_xp || stored_level != derived_level {
                drifted.push(DriftedUser {
                    user_id: UserId::new(id),
                    stored_xp,
                    derived_xp,
                    stored_level,
                    derived_level,
                });
            }
        }
        Ok(drifted)
    }
}

#[async_trait]
impl MaintenanceStore for SqliteMaintenanceStore {
    async fn report(&self) -> Result<MaintenanceReport, DomainError> {
        let duplicate_sections = self.duplicate_groups().await?;

        let orphaned_questions: i64 = sqlx::query(
            "SELECT COUNT(*) AS n FROM questions q
             LEFT JOIN sections s ON s.id = q.section_id
             WHERE s.id IS NULL",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count orphaned questions", e))?
        .try_get("n")
        .map_err(|e| db_error("read orphan count", e))?;

        let stale_completions: i64 = sqlx::query(
            "SELECT COUNT(*) AS n FROM section_completions sc
             WHERE sc.score != (SELECT COALESCE(SUM(up.is_correct), 0)
                                FROM user_progress up
                                JOIN questions q ON q.id = up.question_id
                                WHERE up.user_id = sc.user_id
                                  AND q.section_id = sc.section_id)
                OR sc.total_questions != (SELECT COUNT(*) FROM questions q
                                          WHERE q.section_id = sc.section_id)",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count stale completions", e))?
        .try_get("n")
        .map_err(|e| db_error("read stale count", e))?;

        Ok(MaintenanceReport {
            duplicate_sections,
            orphaned_questions: orphaned_questions.max(0) as u64,
            stale_completions: stale_completions.max(0) as u64,
            drifted_users: self.drifted_users().await?,
        })
    }

    async fn dedupe_sections(&self) -> Result<DedupeOutcome, DomainError> {
        let groups = self.duplicate_groups().await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin dedupe transaction", e))?;

        let mut sections_removed = 0u32;
        let mut questions_repointed = 0u64;
        for group in &groups {
            for dup in &group.duplicates {
                let moved = sqlx::query("UPDATE questions SET section_id = ? WHERE section_id = ?")
                    .bind(group.survivor.as_i64())
                    .bind(dup.as_i64())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("repoint questions", e))?;
                questions_repointed += moved.rows_affected();

                sqlx::query("UPDATE learning_content SET section_id = ? WHERE section_id = ?")
                    .bind(group.survivor.as_i64())
                    .bind(dup.as_i64())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("repoint learning content", e))?;

                // A user may hold rows for both the survivor and the
                // duplicate; the survivor's row wins.
                for table in ["section_learning", "section_completions"] {
                    sqlx::query(&format!(
                        "UPDATE OR IGNORE {} SET section_id = ? WHERE section_id = ?",
                        table
                    ))
                    .bind(group.survivor.as_i64())
                    .bind(dup.as_i64())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("repoint progress rows", e))?;

                    sqlx::query(&format!("DELETE FROM {} WHERE section_id = ?", table))
                        .bind(dup.as_i64())
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| db_error("drop leftover progress rows", e))?;
                }

                sqlx::query("DELETE FROM sections WHERE id = ?")
                    .bind(dup.as_i64())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("delete duplicate section", e))?;
                sections_removed += 1;
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit dedupe transaction", e))?;

        Ok(DedupeOutcome {
            groups_collapsed: groups.len() as u32,
            sections_removed,
            questions_repointed,
        })
    }

    async fn rebuild_completions(&self) -> Result<u64, DomainError> {
        let rows = sqlx::query(
            "SELECT up.user_id, q.section_id,
                    COUNT(*) AS answered,
                    COALESCE(SUM(up.is_correct), 0) AS correct,
                    (SELECT COUNT(*) FROM questions q2
                     WHERE q2.section_id = q.section_id) AS total
             FROM user_progress up
             JOIN questions q ON q.id = up.question_id
             GROUP BY up.user_id, q.section_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("derive completions", e))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin rebuild transaction", e))?;

        let mut written = 0u64;
        for row in &rows {
            let user_id: i64 = row
                .try_get("user_id")
                .map_err(|e| db_error("read derived row", e))?;
            let section_id: i64 = row
                .try_get("section_id")
                .map_err(|e| db_error("read derived row", e))?;
            let answered: i64 = row
                .try_get("answered")
                .map_err(|e| db_error("read derived row", e))?;
            let correct: i64 = row
                .try_get("correct")
                .map_err(|e| db_error("read derived row", e))?;
            let total: i64 = row
                .try_get("total")
                .map_err(|e| db_error("read derived row", e))?;

            let total = total.max(0) as u32;
            let answered = (answered.max(0) as u32).min(total);
            let correct = (correct.max(0) as u32).min(answered);
            let score = SectionScore {
                total_questions: total,
                answered,
                correct,
            };
            let Some(completion) = score.completion() else {
                continue;
            };

            sqlx::query(
                "INSERT INTO section_completions (user_id, section_id, score, total_questions,
                                                  percentage, completed_at)
                 VALUES (?, ?, ?, ?, ?, ?)
                 ON CONFLICT(user_id, section_id) DO UPDATE SET
                     score = excluded.score,
                     total_questions = excluded.total_questions,
                     percentage = excluded.percentage",
            )
            .bind(user_id)
            .bind(section_id)
            .bind(completion.score as i64)
            .bind(completion.total_questions as i64)
            .bind(completion.percentage)
            .bind(encode_timestamp(Timestamp::now()))
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("write rebuilt completion", e))?;
            written += 1;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit rebuild transaction", e))?;
        Ok(written)
    }

    async fn reconcile_xp(&self) -> Result<u64, DomainError> {
        let drifted = self.drifted_users().await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin reconcile transaction", e))?;

        for user in &drifted {
            sqlx::query("UPDATE users SET total_xp = ?, level = ?, updated_at = ? WHERE id = ?")
                .bind(user.derived_xp)
                .bind(user.derived_level)
                .bind(encode_timestamp(Timestamp::now()))
                .bind(user.user_id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("write reconciled xp", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit reconcile transaction", e))?;
        Ok(drifted.len() as u64)
    }
}

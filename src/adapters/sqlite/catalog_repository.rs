//! SQLite implementation of the CatalogRepository port.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::catalog::{LearningContent, Module, Question, QuestionOptions, Section};
use crate::domain::foundation::{
    ContentId, DomainError, ErrorCode, ModuleId, QuestionId, SectionId, Timestamp,
};
use crate::ports::{CatalogRepository, ModuleDraft, QuestionDraft, SectionDraft};

use super::{db_error, decode_timestamp, encode_timestamp, is_unique_violation};

pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_module(row: &SqliteRow) -> Result<Module, DomainError> {
        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| db_error("read module row", e))?;
        Ok(Module::reconstitute(
            ModuleId::new(row.try_get("id").map_err(|e| db_error("read module row", e))?),
            row.try_get("name")
                .map_err(|e| db_error("read module row", e))?,
            row.try_get("display_name")
                .map_err(|e| db_error("read module row", e))?,
            row.try_get("description")
                .map_err(|e| db_error("read module row", e))?,
            row.try_get("order_index")
                .map_err(|e| db_error("read module row", e))?,
            decode_timestamp(&created_at)?,
        ))
    }

    fn row_to_section(row: &SqliteRow) -> Result<Section, DomainError> {
        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| db_error("read section row", e))?;
        Ok(Section::reconstitute(
            SectionId::new(row.try_get("id").map_err(|e| db_error("read section row", e))?),
            ModuleId::new(
                row.try_get("module_id")
                    .map_err(|e| db_error("read section row", e))?,
            ),
            row.try_get("name")
                .map_err(|e| db_error("read section row", e))?,
            row.try_get("display_name")
                .map_err(|e| db_error("read section row", e))?,
            row.try_get("description")
                .map_err(|e| db_error("read section row", e))?,
            row.try_get("order_index")
                .map_err(|e| db_error("read section row", e))?,
            decode_timestamp(&created_at)?,
        ))
    }

    fn row_to_question(row: &SqliteRow) -> Result<Question, DomainError> {
        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| db_error("read question row", e))?;
        let options_json: String = row
            .try_get("options")
            .map_err(|e| db_error("read question row", e))?;
        let options = QuestionOptions::from_json(&options_json).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Malformed options column: {}", e),
            )
        })?;
        Ok(Question::reconstitute(
            QuestionId::new(
                row.try_get("id")
                    .map_err(|e| db_error("read question row", e))?,
            ),
            SectionId::new(
                row.try_get("section_id")
                    .map_err(|e| db_error("read question row", e))?,
            ),
            row.try_get("question_text")
                .map_err(|e| db_error("read question row", e))?,
            options,
            row.try_get("correct_answer")
                .map_err(|e| db_error("read question row", e))?,
            row.try_get("explanation")
                .map_err(|e| db_error("read question row", e))?,
            row.try_get("question_type")
                .map_err(|e| db_error("read question row", e))?,
            decode_timestamp(&created_at)?,
        ))
    }

    fn row_to_content(row: &SqliteRow) -> Result<LearningContent, DomainError> {
        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| db_error("read content row", e))?;
        Ok(LearningContent::reconstitute(
            ContentId::new(row.try_get("id").map_err(|e| db_error("read content row", e))?),
            SectionId::new(
                row.try_get("section_id")
                    .map_err(|e| db_error("read content row", e))?,
            ),
            row.try_get("screen_title")
                .map_err(|e| db_error("read content row", e))?,
            row.try_get("content_markdown")
                .map_err(|e| db_error("read content row", e))?,
            row.try_get("read_time_min")
                .map_err(|e| db_error("read content row", e))?,
            row.try_get("order_index")
                .map_err(|e| db_error("read content row", e))?,
            decode_timestamp(&created_at)?,
        ))
    }

    fn duplicate_entry(e: sqlx::Error, what: &str) -> DomainError {
        if is_unique_violation(&e) {
            DomainError::new(
                ErrorCode::DuplicateEntry,
                format!("A {} with this name or position already exists", what),
            )
        } else {
            db_error("write catalog row", e)
        }
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn list_modules(&self) -> Result<Vec<Module>, DomainError> {
        let rows = sqlx::query("SELECT * FROM modules ORDER BY order_index ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list modules", e))?;
        rows.iter().map(Self::row_to_module).collect()
    }

    async fn find_module(&self, id: ModuleId) -> Result<Option<Module>, DomainError> {
        let row = sqlx::query("SELECT * FROM modules WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch module", e))?;
        row.as_ref().map(Self::row_to_module).transpose()
    }

    async fn sections_for_module(&self, id: ModuleId) -> Result<Vec<Section>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM sections WHERE module_id = ? ORDER BY order_index ASC, id ASC",
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list sections", e))?;
        rows.iter().map(Self::row_to_section).collect()
    }

    async fn find_section(&self, id: SectionId) -> Result<Option<Section>, DomainError> {
        let row = sqlx::query("SELECT * FROM sections WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch section", e))?;
        row.as_ref().map(Self::row_to_section).transpose()
    }

    async fn questions_for_section(&self, id: SectionId) -> Result<Vec<Question>, DomainError> {
        let rows = sqlx::query("SELECT * FROM questions WHERE section_id = ? ORDER BY id ASC")
            .bind(id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list questions", e))?;
        rows.iter().map(Self::row_to_question).collect()
    }

    async fn find_question(&self, id: QuestionId) -> Result<Option<Question>, DomainError> {
        let row = sqlx::query("SELECT * FROM questions WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch question", e))?;
        row.as_ref().map(Self::row_to_question).transpose()
    }

    async fn content_for_section(
        &self,
        id: SectionId,
    ) -> Result<Vec<LearningContent>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM learning_content WHERE section_id = ? ORDER BY order_index ASC, id ASC",
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list learning content", e))?;
        rows.iter().map(Self::row_to_content).collect()
    }

    async fn find_content(&self, id: ContentId) -> Result<Option<LearningContent>, DomainError> {
        let row = sqlx::query("SELECT * FROM learning_content WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch learning content", e))?;
        row.as_ref().map(Self::row_to_content).transpose()
    }

    async fn create_module(&self, draft: &ModuleDraft) -> Result<Module, DomainError> {
        let done = sqlx::query(
            "INSERT INTO modules (name, display_name, description, order_index, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(&draft.display_name)
        .bind(&draft.description)
        .bind(draft.order_index)
        .bind(encode_timestamp(Timestamp::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| Self::duplicate_entry(e, "module"))?;

        self.find_module(ModuleId::new(done.last_insert_rowid()))
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::DatabaseError, "Inserted module row not found")
            })
    }

    async fn update_module(
        &self,
        id: ModuleId,
        draft: &ModuleDraft,
    ) -> Result<Module, DomainError> {
        let done = sqlx::query(
            "UPDATE modules SET name = ?, display_name = ?, description = ?, order_index = ?
             WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(&draft.display_name)
        .bind(&draft.description)
        .bind(draft.order_index)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::duplicate_entry(e, "module"))?;

        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::ModuleNotFound, "Module"));
        }
        self.find_module(id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::ModuleNotFound, "Module")
        })
    }

    async fn delete_module(&self, id: ModuleId) -> Result<(), DomainError> {
        let done = sqlx::query("DELETE FROM modules WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete module", e))?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::ModuleNotFound, "Module"));
        }
        Ok(())
    }

    async fn create_section(&self, draft: &SectionDraft) -> Result<Section, DomainError> {
        let done = sqlx::query(
            "INSERT INTO sections (module_id, name, display_name, description, order_index, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(draft.module_id.as_i64())
        .bind(&draft.name)
        .bind(&draft.display_name)
        .bind(&draft.description)
        .bind(draft.order_index)
        .bind(encode_timestamp(Timestamp::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| Self::duplicate_entry(e, "section"))?;

        self.find_section(SectionId::new(done.last_insert_rowid()))
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::DatabaseError, "Inserted section row not found")
            })
    }

    async fn update_section(
        &self,
        id: SectionId,
        draft: &SectionDraft,
    ) -> Result<Section, DomainError> {
        let done = sqlx::query(
            "UPDATE sections SET module_id = ?, name = ?, display_name = ?, description = ?,
                                 order_index = ?
             WHERE id = ?",
        )
        .bind(draft.module_id.as_i64())
        .bind(&draft.name)
        .bind(&draft.display_name)
        .bind(&draft.description)
        .bind(draft.order_index)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::duplicate_entry(e, "section"))?;

        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::SectionNotFound,
                "Section",
            ));
        }
        self.find_section(id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::SectionNotFound, "Section")
        })
    }

    async fn delete_section(&self, id: SectionId) -> Result<(), DomainError> {
        let done = sqlx::query("DELETE FROM sections WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete section", e))?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::SectionNotFound,
                "Section",
            ));
        }
        Ok(())
    }

    async fn create_question(&self, draft: &QuestionDraft) -> Result<Question, DomainError> {
        let done = sqlx::query(
            "INSERT INTO questions (section_id, question_text, options, correct_answer,
                                    explanation, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(draft.section_id.as_i64())
        .bind(&draft.question_text)
        .bind(draft.options.to_json())
        .bind(&draft.correct_answer)
        .bind(&draft.explanation)
        .bind(encode_timestamp(Timestamp::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert question", e))?;

        self.find_question(QuestionId::new(done.last_insert_rowid()))
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::DatabaseError, "Inserted question row not found")
            })
    }

    async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> Result<Question, DomainError> {
        let done = sqlx::query(
            "UPDATE questions SET section_id = ?, question_text = ?, options = ?,
                                  correct_answer = ?, explanation = ?
             WHERE id = ?",
        )
        .bind(draft.section_id.as_i64())
        .bind(&draft.question_text)
        .bind(draft.options.to_json())
        .bind(&draft.correct_answer)
        .bind(&draft.explanation)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update question", e))?;

        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::QuestionNotFound,
                "Question",
            ));
        }
        self.find_question(id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::QuestionNotFound, "Question")
        })
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError> {
        let done = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete question", e))?;
        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::QuestionNotFound,
                "Question",
            ));
        }
        Ok(())
    }
}

//! In-memory port implementations shared by the handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::catalog::{LearningContent, Module, Question, Section};
use crate::domain::foundation::{
    ContentId, DomainError, ErrorCode, ModuleId, QuestionId, SectionId, Timestamp, UserId,
};
use crate::domain::progress::{AnswerRecord, CompletionRecord, SectionScore, SectionStatus};
use crate::domain::user::{NewUser, User};
use crate::ports::{
    CatalogRepository, ModuleDraft, ProgressRepository, QuestionDraft, SectionDraft, StoredAnswer,
    UserRepository, UserStats,
};

pub struct MockUserRepository {
    users: Mutex<Vec<User>>,
    hashes: Mutex<HashMap<String, String>>,
    next_id: Mutex<i64>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            hashes: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }

    pub fn with_user(self, user: User, password_hash: &str) -> Self {
        self.hashes
            .lock()
            .unwrap()
            .insert(user.email().to_string(), password_hash.to_string());
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn stored(&self, id: UserId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id() == id).cloned()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email() == new_user.email) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "An account with this email already exists",
            ));
        }
        let mut next_id = self.next_id.lock().unwrap();
        let user = User::reconstitute(
            UserId::new(*next_id),
            new_user.email.clone(),
            new_user.display_name.clone(),
            new_user.avatar_key.clone(),
            0,
            1,
            false,
            Timestamp::now(),
            Timestamp::now(),
        );
        *next_id += 1;
        self.hashes
            .lock()
            .unwrap()
            .insert(new_user.email.clone(), new_user.password_hash.clone());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.stored(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, DomainError> {
        let user = self.find_by_email(email).await?;
        Ok(user.and_then(|u| {
            self.hashes
                .lock()
                .unwrap()
                .get(u.email())
                .map(|h| (u, h.clone()))
        }))
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(slot) = users.iter_mut().find(|u| u.id() == user.id()) {
            *slot = user.clone();
        }
        Ok(())
    }

    async fn update_account(
        &self,
        id: UserId,
        display_name: &str,
        is_admin: bool,
    ) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id() == id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User"))?;
        *slot = User::reconstitute(
            slot.id(),
            slot.email().to_string(),
            display_name.to_string(),
            slot.avatar_key().to_string(),
            slot.total_xp(),
            slot.level(),
            is_admin,
            slot.created_at(),
            Timestamp::now(),
        );
        Ok(slot.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id() != id);
        if users.len() == before {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, "User"));
        }
        Ok(())
    }

    async fn top_by_xp(&self, limit: u32) -> Result<Vec<User>, DomainError> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| b.total_xp().cmp(&a.total_xp()));
        users.truncate(limit as usize);
        Ok(users)
    }
}

#[derive(Default)]
pub struct MockCatalogRepository {
    pub modules: Mutex<Vec<Module>>,
    pub sections: Mutex<Vec<Section>>,
    pub questions: Mutex<Vec<Question>>,
    pub content: Mutex<Vec<LearningContent>>,
    next_id: Mutex<i64>,
}

impl MockCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> i64 {
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        *id
    }

    pub fn with_section(self, section: Section) -> Self {
        self.sections.lock().unwrap().push(section);
        self
    }

    pub fn with_question(self, question: Question) -> Self {
        self.questions.lock().unwrap().push(question);
        self
    }

    pub fn with_content(self, content: LearningContent) -> Self {
        self.content.lock().unwrap().push(content);
        self
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn list_modules(&self) -> Result<Vec<Module>, DomainError> {
        let mut modules = self.modules.lock().unwrap().clone();
        modules.sort_by_key(|m| m.order_index());
        Ok(modules)
    }

    async fn find_module(&self, id: ModuleId) -> Result<Option<Module>, DomainError> {
        Ok(self
            .modules
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id() == id)
            .cloned())
    }

    async fn sections_for_module(&self, id: ModuleId) -> Result<Vec<Section>, DomainError> {
        let mut sections: Vec<Section> = self
            .sections
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.module_id() == id)
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.order_index());
        Ok(sections)
    }

    async fn find_section(&self, id: SectionId) -> Result<Option<Section>, DomainError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn questions_for_section(&self, id: SectionId) -> Result<Vec<Question>, DomainError> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.section_id() == id)
            .cloned()
            .collect())
    }

    async fn find_question(&self, id: QuestionId) -> Result<Option<Question>, DomainError> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id() == id)
            .cloned())
    }

    async fn content_for_section(
        &self,
        id: SectionId,
    ) -> Result<Vec<LearningContent>, DomainError> {
        let mut content: Vec<LearningContent> = self
            .content
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.section_id() == id)
            .cloned()
            .collect();
        content.sort_by_key(|c| c.order_index());
        Ok(content)
    }

    async fn find_content(&self, id: ContentId) -> Result<Option<LearningContent>, DomainError> {
        Ok(self
            .content
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn create_module(&self, draft: &ModuleDraft) -> Result<Module, DomainError> {
        if self
            .modules
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.name() == draft.name)
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateEntry,
                "A module with this name or position already exists",
            ));
        }
        let module = Module::reconstitute(
            ModuleId::new(self.next()),
            draft.name.clone(),
            draft.display_name.clone(),
            draft.description.clone(),
            draft.order_index,
            Timestamp::now(),
        );
        self.modules.lock().unwrap().push(module.clone());
        Ok(module)
    }

    async fn update_module(
        &self,
        id: ModuleId,
        draft: &ModuleDraft,
    ) -> Result<Module, DomainError> {
        let mut modules = self.modules.lock().unwrap();
        let slot = modules
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::ModuleNotFound, "Module"))?;
        *slot = Module::reconstitute(
            id,
            draft.name.clone(),
            draft.display_name.clone(),
            draft.description.clone(),
            draft.order_index,
            slot.created_at(),
        );
        Ok(slot.clone())
    }

    async fn delete_module(&self, id: ModuleId) -> Result<(), DomainError> {
        let mut modules = self.modules.lock().unwrap();
        let before = modules.len();
        modules.retain(|m| m.id() != id);
        if modules.len() == before {
            return Err(DomainError::not_found(ErrorCode::ModuleNotFound, "Module"));
        }
        self.sections.lock().unwrap().retain(|s| s.module_id() != id);
        Ok(())
    }

    async fn create_section(&self, draft: &SectionDraft) -> Result<Section, DomainError> {
        let section = Section::reconstitute(
            SectionId::new(self.next()),
            draft.module_id,
            draft.name.clone(),
            draft.display_name.clone(),
            draft.description.clone(),
            draft.order_index,
            Timestamp::now(),
        );
        self.sections.lock().unwrap().push(section.clone());
        Ok(section)
    }

    async fn update_section(
        &self,
        id: SectionId,
        draft: &SectionDraft,
    ) -> Result<Section, DomainError> {
        let mut sections = self.sections.lock().unwrap();
        let slot = sections
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::SectionNotFound, "Section"))?;
        *slot = Section::reconstitute(
            id,
            draft.module_id,
            draft.name.clone(),
            draft.display_name.clone(),
            draft.description.clone(),
            draft.order_index,
            slot.created_at(),
        );
        Ok(slot.clone())
    }

    async fn delete_section(&self, id: SectionId) -> Result<(), DomainError> {
        let mut sections = self.sections.lock().unwrap();
        let before = sections.len();
        sections.retain(|s| s.id() != id);
        if sections.len() == before {
            return Err(DomainError::not_found(ErrorCode::SectionNotFound, "Section"));
        }
        self.questions.lock().unwrap().retain(|q| q.section_id() != id);
        Ok(())
    }

    async fn create_question(&self, draft: &QuestionDraft) -> Result<Question, DomainError> {
        let question = Question::reconstitute(
            QuestionId::new(self.next()),
            draft.section_id,
            draft.question_text.clone(),
            draft.options.clone(),
            draft.correct_answer.clone(),
            draft.explanation.clone(),
            crate::domain::catalog::QUESTION_TYPE_MULTIPLE_CHOICE.to_string(),
            Timestamp::now(),
        );
        self.questions.lock().unwrap().push(question.clone());
        Ok(question)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> Result<Question, DomainError> {
        let mut questions = self.questions.lock().unwrap();
        let slot = questions
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::QuestionNotFound, "Question"))?;
        *slot = Question::reconstitute(
            id,
            draft.section_id,
            draft.question_text.clone(),
            draft.options.clone(),
            draft.correct_answer.clone(),
            draft.explanation.clone(),
            slot.question_type().to_string(),
            slot.created_at(),
        );
        Ok(slot.clone())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError> {
        let mut questions = self.questions.lock().unwrap();
        let before = questions.len();
        questions.retain(|q| q.id() != id);
        if questions.len() == before {
            return Err(DomainError::not_found(
                ErrorCode::QuestionNotFound,
                "Question",
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockProgressRepository {
    /// question -> owning section, so scores can be tallied.
    pub question_sections: Mutex<HashMap<QuestionId, SectionId>>,
    pub answers: Mutex<HashMap<(i64, i64), StoredAnswer>>,
    pub completions: Mutex<HashMap<(i64, i64), CompletionRecord>>,
    pub learned: Mutex<Vec<(i64, i64)>>,
    pub content_done: Mutex<Vec<(i64, i64)>>,
}

impl MockProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_question(self, question_id: QuestionId, section_id: SectionId) -> Self {
        self.question_sections
            .lock()
            .unwrap()
            .insert(question_id, section_id);
        self
    }
}

#[async_trait]
impl ProgressRepository for MockProgressRepository {
    async fn find_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<StoredAnswer>, DomainError> {
        Ok(self
            .answers
            .lock()
            .unwrap()
            .get(&(user_id.as_i64(), question_id.as_i64()))
            .cloned())
    }

    async fn upsert_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        is_correct: bool,
        selected_answer: &str,
        xp_awarded: i64,
    ) -> Result<(), DomainError> {
        let mut answers = self.answers.lock().unwrap();
        let key = (user_id.as_i64(), question_id.as_i64());
        let lifetime_award = answers
            .get(&key)
            .map(|a| a.xp_awarded.max(xp_awarded))
            .unwrap_or(xp_awarded);
        answers.insert(
            key,
            StoredAnswer {
                question_id,
                is_correct,
                selected_answer: Some(selected_answer.to_string()),
                xp_awarded: lifetime_award,
                answered_at: Timestamp::now(),
            },
        );
        Ok(())
    }

    async fn answers_for_section(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<Vec<StoredAnswer>, DomainError> {
        let question_sections = self.question_sections.lock().unwrap();
        Ok(self
            .answers
            .lock()
            .unwrap()
            .iter()
            .filter(|((uid, qid), _)| {
                *uid == user_id.as_i64()
                    && question_sections.get(&QuestionId::new(*qid)) == Some(&section_id)
            })
            .map(|(_, a)| a.clone())
            .collect())
    }

    async fn section_score(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<SectionScore, DomainError> {
        let total = self
            .question_sections
            .lock()
            .unwrap()
            .values()
            .filter(|s| **s == section_id)
            .count() as u32;
        let answers: Vec<AnswerRecord> = self
            .answers_for_section(user_id, section_id)
            .await?
            .iter()
            .map(|a| AnswerRecord {
                is_correct: a.is_correct,
                xp_awarded: a.xp_awarded,
            })
            .collect();
        Ok(SectionScore::from_answers(total, &answers))
    }

    async fn upsert_completion(
        &self,
        user_id: UserId,
        section_id: SectionId,
        completion: &CompletionRecord,
    ) -> Result<(), DomainError> {
        self.completions
            .lock()
            .unwrap()
            .insert((user_id.as_i64(), section_id.as_i64()), *completion);
        Ok(())
    }

    async fn find_completion(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<Option<CompletionRecord>, DomainError> {
        Ok(self
            .completions
            .lock()
            .unwrap()
            .get(&(user_id.as_i64(), section_id.as_i64()))
            .copied())
    }

    async fn mark_learned(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<(), DomainError> {
        let mut learned = self.learned.lock().unwrap();
        let key = (user_id.as_i64(), section_id.as_i64());
        if !learned.contains(&key) {
            learned.push(key);
        }
        Ok(())
    }

    async fn is_learned(
        &self,
        user_id: UserId,
        section_id: SectionId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .learned
            .lock()
            .unwrap()
            .contains(&(user_id.as_i64(), section_id.as_i64())))
    }

    async fn mark_content_complete(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<(), DomainError> {
        let mut done = self.content_done.lock().unwrap();
        let key = (user_id.as_i64(), content_id.as_i64());
        if !done.contains(&key) {
            done.push(key);
        }
        Ok(())
    }

    async fn completed_content_ids(
        &self,
        user_id: UserId,
        _section_id: SectionId,
    ) -> Result<Vec<ContentId>, DomainError> {
        Ok(self
            .content_done
            .lock()
            .unwrap()
            .iter()
            .filter(|(uid, _)| *uid == user_id.as_i64())
            .map(|(_, cid)| ContentId::new(*cid))
            .collect())
    }

    async fn section_statuses_for_module(
        &self,
        user_id: UserId,
        _module_id: ModuleId,
    ) -> Result<HashMap<SectionId, SectionStatus>, DomainError> {
        let sections: Vec<SectionId> = {
            let question_sections = self.question_sections.lock().unwrap();
            let mut ids: Vec<SectionId> = question_sections.values().copied().collect();
            ids.sort_by_key(|s| s.as_i64());
            ids.dedup();
            ids
        };
        let mut statuses = HashMap::new();
        for section_id in sections {
            let score = self.section_score(user_id, section_id).await?;
            let learned = self.is_learned(user_id, section_id).await?;
            let completed = self.find_completion(user_id, section_id).await?.is_some();
            statuses.insert(section_id, SectionStatus::new(score, learned, completed));
        }
        Ok(statuses)
    }

    async fn completed_section_counts(
        &self,
        user_id: UserId,
    ) -> Result<HashMap<ModuleId, u32>, DomainError> {
        // Mock keeps no module mapping; tests that need counts use the
        // sqlite adapter instead.
        let _ = user_id;
        Ok(HashMap::new())
    }

    async fn user_stats(&self, user_id: UserId) -> Result<UserStats, DomainError> {
        let answers = self.answers.lock().unwrap();
        let mine: Vec<&StoredAnswer> = answers
            .iter()
            .filter(|((uid, _), _)| *uid == user_id.as_i64())
            .map(|(_, a)| a)
            .collect();
        Ok(UserStats {
            questions_answered: mine.len() as u32,
            questions_correct: mine.iter().filter(|a| a.is_correct).count() as u32,
            sections_completed: self
                .completions
                .lock()
                .unwrap()
                .keys()
                .filter(|(uid, _)| *uid == user_id.as_i64())
                .count() as u32,
            sections_learned: self
                .learned
                .lock()
                .unwrap()
                .iter()
                .filter(|(uid, _)| *uid == user_id.as_i64())
                .count() as u32,
        })
    }
}

//! Admin commands: account management and catalog editing.

use std::sync::Arc;

use tracing::info;

use crate::domain::catalog::{
    validate_names, validate_question_fields, Module, Question, Section,
};
use crate::domain::foundation::{DomainError, ErrorCode, ModuleId, QuestionId, SectionId, UserId};
use crate::domain::user::validate_display_name;
use crate::ports::{
    CatalogRepository, ModuleDraft, QuestionDraft, SectionDraft, UserRepository,
};

/// Command to update another user's account.
#[derive(Debug, Clone)]
pub struct UpdateUserAccountCommand {
    pub target: UserId,
    pub display_name: String,
    pub is_admin: bool,
}

/// Handler for admin edits of user accounts.
pub struct UpdateUserAccountHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateUserAccountHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: UpdateUserAccountCommand,
    ) -> Result<crate::domain::user::User, DomainError> {
        validate_display_name(&cmd.display_name)?;
        let user = self
            .users
            .update_account(cmd.target, cmd.display_name.trim(), cmd.is_admin)
            .await?;
        info!(target = %cmd.target, is_admin = cmd.is_admin, "account updated");
        Ok(user)
    }
}

/// Command to delete a user account.
#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub acting_admin: UserId,
    pub target: UserId,
}

/// Handler for account deletion. Progress rows cascade with the account.
pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), DomainError> {
        if cmd.acting_admin == cmd.target {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Admins cannot delete their own account",
            ));
        }
        self.users.delete(cmd.target).await?;
        info!(target = %cmd.target, "account deleted");
        Ok(())
    }
}

/// Handler for catalog editing. Validates drafts and checks parents before
/// delegating to the repository.
pub struct ManageCatalogHandler {
    catalog: Arc<dyn CatalogRepository>,
}

impl ManageCatalogHandler {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    pub async fn create_module(&self, draft: ModuleDraft) -> Result<Module, DomainError> {
        validate_names(&draft.name, &draft.display_name)?;
        self.catalog.create_module(&draft).await
    }

    pub async fn update_module(
        &self,
        id: ModuleId,
        draft: ModuleDraft,
    ) -> Result<Module, DomainError> {
        validate_names(&draft.name, &draft.display_name)?;
        self.catalog.update_module(id, &draft).await
    }

    pub async fn delete_module(&self, id: ModuleId) -> Result<(), DomainError> {
        self.catalog.delete_module(id).await?;
        info!(module_id = %id, "module deleted");
        Ok(())
    }

    pub async fn create_section(&self, draft: SectionDraft) -> Result<Section, DomainError> {
        validate_names(&draft.name, &draft.display_name)?;
        self.catalog
            .find_module(draft.module_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::ModuleNotFound, "Module"))?;
        self.catalog.create_section(&draft).await
    }

    pub async fn update_section(
        &self,
        id: SectionId,
        draft: SectionDraft,
    ) -> Result<Section, DomainError> {
        validate_names(&draft.name, &draft.display_name)?;
        self.catalog
            .find_module(draft.module_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::ModuleNotFound, "Module"))?;
        self.catalog.update_section(id, &draft).await
    }

    pub async fn delete_section(&self, id: SectionId) -> Result<(), DomainError> {
        self.catalog.delete_section(id).await?;
        info!(section_id = %id, "section deleted");
        Ok(())
    }

    pub async fn create_question(&self, draft: QuestionDraft) -> Result<Question, DomainError> {
        validate_question_fields(
            &draft.question_text,
            &draft.options,
            &draft.correct_answer,
            &draft.explanation,
        )?;
        self.catalog
            .find_section(draft.section_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::SectionNotFound, "Section"))?;
        self.catalog.create_question(&draft).await
    }

    pub async fn update_question(
        &self,
        id: QuestionId,
        draft: QuestionDraft,
    ) -> Result<Question, DomainError> {
        validate_question_fields(
            &draft.question_text,
            &draft.options,
            &draft.correct_answer,
            &draft.explanation,
        )?;
        self.catalog
            .find_section(draft.section_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::SectionNotFound, "Section"))?;
        self.catalog.update_question(id, &draft).await
    }

    pub async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError> {
        self.catalog.delete_question(id).await?;
        info!(question_id = %id, "question deleted");
        Ok(())
    }
}

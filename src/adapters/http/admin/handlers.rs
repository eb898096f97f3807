//! HTTP handlers for the admin endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::handlers::admin::{DeleteUserCommand, UpdateUserAccountCommand};
use crate::domain::catalog::QuestionOptions;
use crate::domain::foundation::{DomainError, ModuleId, QuestionId, SectionId, UserId};
use crate::ports::{ModuleDraft, QuestionDraft, SectionDraft};

use super::super::auth::dto::{MessageResponse, UserResponse};
use super::super::error::ApiError;
use super::super::middleware::RequireAdmin;
use super::super::state::AppState;
use super::dto::{
    AdminQuestionResponse, ModuleRequest, ModuleResponse, QuestionRequest, SectionRequest,
    SectionResponse, UpdateUserRequest,
};

// ── Users ───────────────────────────────────────────────────────────────

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list_all().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// PUT /api/admin/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .update_account
        .handle(UpdateUserAccountCommand {
            target: UserId::new(id),
            display_name: req.display_name,
            is_admin: req.is_admin,
        })
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/admin/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .delete_user
        .handle(DeleteUserCommand {
            acting_admin: admin.id,
            target: UserId::new(id),
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "Account deleted".to_string(),
    }))
}

// ── Modules ─────────────────────────────────────────────────────────────

fn module_draft(req: ModuleRequest) -> ModuleDraft {
    ModuleDraft {
        name: req.name,
        display_name: req.display_name,
        description: req.description,
        order_index: req.order_index,
    }
}

/// POST /api/admin/modules
pub async fn create_module(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<ModuleRequest>,
) -> Result<(StatusCode, Json<ModuleResponse>), ApiError> {
    let module = state.manage_catalog.create_module(module_draft(req)).await?;
    Ok((StatusCode::CREATED, Json(ModuleResponse::from(&module))))
}

/// PUT /api/admin/modules/:id
pub async fn update_module(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(req): Json<ModuleRequest>,
) -> Result<Json<ModuleResponse>, ApiError> {
    let module = state
        .manage_catalog
        .update_module(ModuleId::new(id), module_draft(req))
        .await?;
    Ok(Json(ModuleResponse::from(&module)))
}

/// DELETE /api/admin/modules/:id
pub async fn delete_module(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.manage_catalog.delete_module(ModuleId::new(id)).await?;
    Ok(Json(MessageResponse {
        message: "Module deleted".to_string(),
    }))
}

// ── Sections ────────────────────────────────────────────────────────────

fn section_draft(req: SectionRequest) -> SectionDraft {
    SectionDraft {
        module_id: ModuleId::new(req.module_id),
        name: req.name,
        display_name: req.display_name,
        description: req.description,
        order_index: req.order_index,
    }
}

/// POST /api/admin/sections
pub async fn create_section(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<SectionRequest>,
) -> Result<(StatusCode, Json<SectionResponse>), ApiError> {
    let section = state
        .manage_catalog
        .create_section(section_draft(req))
        .await?;
    Ok((StatusCode::CREATED, Json(SectionResponse::from(&section))))
}

/// PUT /api/admin/sections/:id
pub async fn update_section(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(req): Json<SectionRequest>,
) -> Result<Json<SectionResponse>, ApiError> {
    let section = state
        .manage_catalog
        .update_section(SectionId::new(id), section_draft(req))
        .await?;
    Ok(Json(SectionResponse::from(&section)))
}

/// DELETE /api/admin/sections/:id
pub async fn delete_section(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .manage_catalog
        .delete_section(SectionId::new(id))
        .await?;
    Ok(Json(MessageResponse {
        message: "Section deleted".to_string(),
    }))
}

// ── Questions ───────────────────────────────────────────────────────────

fn question_draft(req: QuestionRequest) -> Result<QuestionDraft, DomainError> {
    let options = QuestionOptions::new(req.options).map_err(DomainError::from)?;
    Ok(QuestionDraft {
        section_id: SectionId::new(req.section_id),
        question_text: req.question_text,
        options,
        correct_answer: req.correct_answer,
        explanation: req.explanation,
    })
}

/// POST /api/admin/questions
pub async fn create_question(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<QuestionRequest>,
) -> Result<(StatusCode, Json<AdminQuestionResponse>), ApiError> {
    let question = state
        .manage_catalog
        .create_question(question_draft(req)?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AdminQuestionResponse::from(&question)),
    ))
}

/// PUT /api/admin/questions/:id
pub async fn update_question(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<AdminQuestionResponse>, ApiError> {
    let question = state
        .manage_catalog
        .update_question(QuestionId::new(id), question_draft(req)?)
        .await?;
    Ok(Json(AdminQuestionResponse::from(&question)))
}

/// DELETE /api/admin/questions/:id
pub async fn delete_question(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .manage_catalog
        .delete_question(QuestionId::new(id))
        .await?;
    Ok(Json(MessageResponse {
        message: "Question deleted".to_string(),
    }))
}

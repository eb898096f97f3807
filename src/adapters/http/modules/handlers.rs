//! HTTP handlers for the module catalog.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode, ModuleId};

use super::super::error::ApiError;
use super::super::middleware::OptionalAuth;
use super::super::state::AppState;
use super::dto::{ModuleDetailResponse, ModuleSummaryResponse, SectionOverviewResponse};

/// GET /api/modules
///
/// Anonymous callers get the catalog; signed-in callers additionally get
/// their completed-section count per module.
pub async fn list_modules(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<Json<Vec<ModuleSummaryResponse>>, ApiError> {
    let modules = state.catalog.list_modules().await?;

    let completed: HashMap<ModuleId, u32> = match &user {
        Some(user) => state.progress.completed_section_counts(user.id).await?,
        None => HashMap::new(),
    };

    let mut out = Vec::with_capacity(modules.len());
    for module in &modules {
        let sections = state.catalog.sections_for_module(module.id()).await?;
        let completed_sections = user
            .as_ref()
            .map(|_| completed.get(&module.id()).copied().unwrap_or(0));
        out.push(ModuleSummaryResponse::new(
            module,
            sections.len() as u32,
            completed_sections,
        ));
    }
    Ok(Json(out))
}

/// GET /api/modules/:id
pub async fn get_module(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<i64>,
) -> Result<Json<ModuleDetailResponse>, ApiError> {
    let module_id = ModuleId::new(id);
    let module = state
        .catalog
        .find_module(module_id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::ModuleNotFound, "Module not found"))?;

    let sections = state.catalog.sections_for_module(module_id).await?;

    let statuses = match &user {
        Some(user) => {
            state
                .progress
                .section_statuses_for_module(user.id, module_id)
                .await?
        }
        None => HashMap::new(),
    };

    let mut out = Vec::with_capacity(sections.len());
    for section in &sections {
        let questions = state.catalog.questions_for_section(section.id()).await?;
        let status = user.as_ref().and_then(|_| statuses.get(&section.id()));
        out.push(SectionOverviewResponse::new(
            section,
            questions.len() as u32,
            status,
        ));
    }

    Ok(Json(ModuleDetailResponse {
        id: module.id().as_i64(),
        name: module.name().to_string(),
        display_name: module.display_name().to_string(),
        description: module.description().map(str::to_string),
        order_index: module.order_index(),
        sections: out,
    }))
}

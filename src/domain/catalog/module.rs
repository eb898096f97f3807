//! Module value type - top-level course unit.

use crate::domain::foundation::{ModuleId, Timestamp, ValidationError};

/// A top-level course unit, ordered by `order_index`.
///
/// `name` is the stable unique key ("Module 1: ..."); `display_name` is what
/// the client renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    id: ModuleId,
    name: String,
    display_name: String,
    description: Option<String>,
    order_index: i64,
    created_at: Timestamp,
}

impl Module {
    /// Rebuilds a module from a persisted row.
    pub fn reconstitute(
        id: ModuleId,
        name: String,
        display_name: String,
        description: Option<String>,
        order_index: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            display_name,
            description,
            order_index,
            created_at,
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn order_index(&self) -> i64 {
        self.order_index
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Validates the name fields of a module or section create/update request.
pub fn validate_names(name: &str, display_name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if display_name.trim().is_empty() {
        return Err(ValidationError::empty_field("display_name"));
    }
    Ok(())
}

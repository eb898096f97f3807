//! Section value type - quiz/learning unit within a module.

use crate::domain::foundation::{ModuleId, SectionId, Timestamp};

/// A section inside a module. Names and order are unique per module.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: SectionId,
    module_id: ModuleId,
    name: String,
    display_name: String,
    description: Option<String>,
    order_index: i64,
    created_at: Timestamp,
}

impl Section {
    /// Rebuilds a section from a persisted row.
    pub fn reconstitute(
        id: SectionId,
        module_id: ModuleId,
        name: String,
        display_name: String,
        description: Option<String>,
        order_index: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            module_id,
            name,
            display_name,
            description,
            order_index,
            created_at,
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn module_id(&self) -> ModuleId {
        self.module_id
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

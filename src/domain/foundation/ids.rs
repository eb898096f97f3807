//! Strongly-typed identifier value objects.
//!
//! The persisted schema uses AUTOINCREMENT integer keys, so ids wrap `i64`.
//! A fresh aggregate has no id until the database assigns one; repositories
//! return the assigned id from `create` calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an id from a database row key.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw integer key.
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user.
    UserId
);

define_id!(
    /// Unique identifier for a course module.
    ModuleId
);

define_id!(
    /// Unique identifier for a section within a module.
    SectionId
);

define_id!(
    /// Unique identifier for a quiz question.
    QuestionId
);

define_id!(
    /// Unique identifier for a learning content screen.
    ContentId
);

define_id!(
    /// Unique identifier for a support ticket.
    TicketId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrips_through_display_and_parse() {
        let id = SectionId::new(42);
        let parsed: SectionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_rejects_non_numeric_input() {
        assert!("abc".parse::<QuestionId>().is_err());
    }

    #[test]
    fn id_serializes_transparently() {
        let id = UserId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }

    #[test]
    fn distinct_id_types_do_not_compare() {
        // Compile-time guarantee; this test documents the intent.
        let user = UserId::new(1);
        let module = ModuleId::new(1);
        assert_eq!(user.as_i64(), module.as_i64());
    }
}

//! Foundation types shared across the domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ContentId, ModuleId, QuestionId, SectionId, TicketId, UserId};
pub use timestamp::Timestamp;

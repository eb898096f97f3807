//! Ports - interfaces between the domain and the outside world.
//!
//! Following hexagonal architecture, ports define the contracts the
//! application layer depends on. Adapters (sqlite, jwt, argon2) implement
//! them.
//!
//! ## Repository ports
//!
//! - `UserRepository` - accounts, XP totals, leaderboard
//! - `CatalogRepository` - modules, sections, questions, learning content
//! - `ProgressRepository` - answers, completions, learn markers
//! - `SupportRepository` - support tickets
//! - `MaintenanceStore` - schema-drift repair operations
//!
//! ## Service ports
//!
//! - `PasswordHasher` - password hashing and verification
//! - `TokenService` - session token issuance and validation

mod catalog_repository;
mod maintenance;
mod password_hasher;
mod progress_repository;
mod support_repository;
mod token_service;
mod user_repository;

pub use catalog_repository::{CatalogRepository, ModuleDraft, QuestionDraft, SectionDraft};
pub use maintenance::{
    DedupeOutcome, DriftedUser, DuplicateSectionGroup, MaintenanceReport, MaintenanceStore,
};
pub use password_hasher::PasswordHasher;
pub use progress_repository::{ProgressRepository, StoredAnswer, UserStats};
pub use support_repository::{NewTicket, SupportRepository, SupportTicket};
pub use token_service::{IssuedToken, TokenService};
pub use user_repository::UserRepository;

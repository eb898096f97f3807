//! Domain layer - training content, users, and the progress/completion core.

pub mod catalog;
pub mod foundation;
pub mod progress;
pub mod user;

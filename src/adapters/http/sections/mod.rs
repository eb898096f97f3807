//! Section detail, quiz, and completion endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::section_routes;

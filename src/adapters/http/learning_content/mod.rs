//! Learning content (reading screen) endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::learning_content_routes;

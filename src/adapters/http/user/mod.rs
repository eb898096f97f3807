//! Profile and stats endpoints for the signed-in user.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::user_routes;

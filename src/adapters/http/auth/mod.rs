//! Session endpoints: register, login, logout, current user.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;

//! HTTP adapters - the JSON API under `/api`.
//!
//! Each area owns its routes, handlers, and DTOs; the router module wires
//! them together with the shared middleware stack.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod leaderboard;
pub mod learning_content;
pub mod maintenance;
pub mod middleware;
pub mod modules;
pub mod questions;
pub mod router;
pub mod sections;
pub mod state;
pub mod support;
pub mod user;

pub use error::{ApiError, ErrorResponse};
pub use router::build_router;
pub use state::AppState;

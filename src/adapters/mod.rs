//! Adapters - implementations of the ports against real infrastructure.
//!
//! - `sqlite` - repositories over a single SQLite file
//! - `auth` - Argon2 password hashing and JWT session tokens
//! - `http` - the axum JSON API

pub mod auth;
pub mod http;
pub mod sqlite;

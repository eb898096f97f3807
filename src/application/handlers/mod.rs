//! Command handlers, grouped by area.

pub mod admin;
pub mod auth;
pub mod maintenance;
pub mod progress;

#[cfg(test)]
pub(crate) mod test_support;

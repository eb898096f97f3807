//! Admin endpoints: user accounts, catalog editing, support tickets.
//!
//! Every route here requires the admin flag; the extractor rejects
//! non-admin sessions with 403.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::admin_routes;

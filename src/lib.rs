//! SenseBait - Security-awareness training platform backend
//!
//! Users work through modules and sections of learning content, answer
//! multiple-choice questions, and earn XP. Administrators manage users,
//! content, and database maintenance.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! # regsite_core
//!
//! Core logic for Regsite: classifying auth provider errors into
//! user-facing text, the sign-in flow built on top of it, and the
//! test database provisioner.

pub mod auth;
pub mod config;
pub mod db;
pub mod migrate;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

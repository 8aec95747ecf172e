//! Data models shared across the crate.

pub mod auth;

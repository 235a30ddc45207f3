//! Domain models for orgman.
//!
//! These are the core types shared across all crates.

pub mod admin;
pub mod organization;

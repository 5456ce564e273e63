//! Domain logic for the cinema booking backend.
//!
//! This crate has zero internal dependencies so the db and api layers (and
//! any future CLI tooling) can share the same types and rules.

pub mod availability;
pub mod error;
pub mod roles;
pub mod status;
pub mod types;

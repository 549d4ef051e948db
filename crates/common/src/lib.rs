//! Shared wire DTOs for the inventory catalog workspace.
//!
//! Keep transport-facing request and response types here so the codec layer
//! and the catalog core agree on a single representation.

/// Shared API DTOs for cross-crate use.
pub mod api;

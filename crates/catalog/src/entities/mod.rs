//! Internal entity model: domain types, creation defaults, masked update
//! application, and conversion to and from the wire DTOs in `common::api`.
//!
//! Wire and internal enums are distinct types bridged by exhaustive `From`
//! impls, so either side can grow variants without silent ordinal drift.

pub mod account;
pub mod app_network;
pub mod application;
pub mod asset;
pub mod cluster;
pub mod device;
pub mod node;
pub mod organization;
pub mod project;
pub mod role;
pub mod user;

use uuid::Uuid;

/// Server-side identifier for entities without a caller-supplied natural key.
pub(crate) fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

//! Record Store seam.
//!
//! One trait per entity type, mirroring the per-table layout of the backing
//! store. Stores are individually consistent but share no transaction; the
//! managers own cross-store consistency. The in-memory implementations back
//! tests and embedded deployments and double as the reference semantics for
//! real store adapters: duplicate adds fail `AlreadyExists`, lookups of
//! absent keys fail `NotFound`, and association lists preserve insertion
//! order.

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

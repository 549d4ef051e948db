//! Managers: one module per sub-domain.
//!
//! Every operation follows the same shape: validate the request, check
//! referential preconditions, mutate the primary record store, mutate the
//! relationship indexes, and on failure compensate already-committed steps in
//! reverse order via [`crate::saga::Saga`]. Managers hold no state beyond the
//! provider handles in [`crate::state::CatalogState`].

pub mod accounts;
pub mod app_network;
pub mod applications;
pub mod assets;
pub mod clusters;
pub mod devices;
pub mod nodes;
pub mod organizations;
pub mod projects;
pub mod roles;
pub mod users;

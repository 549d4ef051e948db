pub mod config;
pub mod entities;
pub mod error;
pub mod index;
pub mod provider;
pub mod saga;
pub mod services;
pub mod state;
pub mod validation;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use error::{CatalogError, ErrorKind, OpResult};
pub use state::CatalogState;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .init();
}

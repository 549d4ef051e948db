use std::sync::Arc;

use crate::config::{AppConfig, EndpointsConfig, LimitsConfig};
use crate::provider::{
    account::{DynAccountProvider, InMemoryAccountProvider},
    app_network::{DynAppNetworkProvider, InMemoryAppNetworkProvider},
    application::{DynApplicationProvider, InMemoryApplicationProvider},
    asset::{DynAssetProvider, InMemoryAssetProvider},
    cluster::{DynClusterProvider, InMemoryClusterProvider},
    device::{DynDeviceProvider, InMemoryDeviceProvider},
    node::{DynNodeProvider, InMemoryNodeProvider},
    organization::{DynOrganizationProvider, InMemoryOrganizationProvider},
    project::{DynProjectProvider, InMemoryProjectProvider},
    role::{DynRoleProvider, InMemoryRoleProvider},
    user::{DynUserProvider, InMemoryUserProvider},
};

/// Shared handle bundle for the managers. The state owns no domain data of
/// its own; it is cheap to clone and safe to share across concurrent calls.
#[derive(Clone)]
pub struct CatalogState {
    pub organizations: DynOrganizationProvider,
    pub clusters: DynClusterProvider,
    pub nodes: DynNodeProvider,
    pub assets: DynAssetProvider,
    pub devices: DynDeviceProvider,
    pub applications: DynApplicationProvider,
    pub app_network: DynAppNetworkProvider,
    pub users: DynUserProvider,
    pub roles: DynRoleProvider,
    pub accounts: DynAccountProvider,
    pub projects: DynProjectProvider,
    pub limits: LimitsConfig,
    pub endpoints: EndpointsConfig,
}

impl CatalogState {
    /// State backed entirely by in-memory record stores. Used by tests and
    /// embedded deployments; production wiring swaps in real store adapters.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self {
            organizations: Arc::new(InMemoryOrganizationProvider::new()),
            clusters: Arc::new(InMemoryClusterProvider::new()),
            nodes: Arc::new(InMemoryNodeProvider::new()),
            assets: Arc::new(InMemoryAssetProvider::new()),
            devices: Arc::new(InMemoryDeviceProvider::new()),
            applications: Arc::new(InMemoryApplicationProvider::new()),
            app_network: Arc::new(InMemoryAppNetworkProvider::new()),
            users: Arc::new(InMemoryUserProvider::new()),
            roles: Arc::new(InMemoryRoleProvider::new()),
            accounts: Arc::new(InMemoryAccountProvider::new()),
            projects: Arc::new(InMemoryProjectProvider::new()),
            limits: config.limits.clone(),
            endpoints: config.endpoints.clone(),
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::application::{AppDescriptor, AppEndpoint, AppInstance, AppZtNetwork};
use crate::error::{CatalogError, OpResult};

fn zt_key(organization_id: &str, app_instance_id: &str) -> String {
    format!("{organization_id}/{app_instance_id}")
}

/// Record store for application descriptors, instances, endpoints, and
/// zero-trust networks.
#[async_trait]
pub trait ApplicationProvider: Send + Sync {
    async fn add_descriptor(&self, descriptor: AppDescriptor) -> OpResult<()>;
    async fn descriptor_exists(&self, descriptor_id: &str) -> OpResult<bool>;
    async fn get_descriptor(&self, descriptor_id: &str) -> OpResult<AppDescriptor>;
    async fn remove_descriptor(&self, descriptor_id: &str) -> OpResult<()>;

    async fn add_instance(&self, instance: AppInstance) -> OpResult<()>;
    async fn instance_exists(&self, instance_id: &str) -> OpResult<bool>;
    async fn get_instance(&self, instance_id: &str) -> OpResult<AppInstance>;
    async fn update_instance(&self, instance: AppInstance) -> OpResult<()>;
    async fn remove_instance(&self, instance_id: &str) -> OpResult<()>;

    /// Register an endpoint under its global FQDN. Re-registering the same
    /// endpoint instance replaces the previous entry (store upsert).
    async fn add_endpoint(&self, endpoint: AppEndpoint) -> OpResult<()>;
    async fn list_endpoints(&self, global_fqdn: &str) -> OpResult<Vec<AppEndpoint>>;
    async fn remove_endpoints(
        &self,
        organization_id: &str,
        app_instance_id: &str,
    ) -> OpResult<()>;

    /// Set the zero-trust network of an instance (store upsert).
    async fn add_zt_network(&self, network: AppZtNetwork) -> OpResult<()>;
    async fn get_zt_network(
        &self,
        organization_id: &str,
        app_instance_id: &str,
    ) -> OpResult<AppZtNetwork>;
    async fn remove_zt_network(
        &self,
        organization_id: &str,
        app_instance_id: &str,
    ) -> OpResult<()>;
}

pub type DynApplicationProvider = Arc<dyn ApplicationProvider>;

/// In-memory application store.
pub struct InMemoryApplicationProvider {
    descriptors: DashMap<String, AppDescriptor>,
    instances: DashMap<String, AppInstance>,
    endpoints: DashMap<String, Vec<AppEndpoint>>,
    zt_networks: DashMap<String, AppZtNetwork>,
}

impl InMemoryApplicationProvider {
    pub fn new() -> Self {
        Self {
            descriptors: DashMap::new(),
            instances: DashMap::new(),
            endpoints: DashMap::new(),
            zt_networks: DashMap::new(),
        }
    }
}

impl Default for InMemoryApplicationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApplicationProvider for InMemoryApplicationProvider {
    async fn add_descriptor(&self, descriptor: AppDescriptor) -> OpResult<()> {
        let id = descriptor.app_descriptor_id.clone();
        if self.descriptors.contains_key(&id) {
            return Err(CatalogError::already_exists("descriptor", id));
        }
        self.descriptors.insert(id, descriptor);
        Ok(())
    }

    async fn descriptor_exists(&self, descriptor_id: &str) -> OpResult<bool> {
        Ok(self.descriptors.contains_key(descriptor_id))
    }

    async fn get_descriptor(&self, descriptor_id: &str) -> OpResult<AppDescriptor> {
        self.descriptors
            .get(descriptor_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("descriptor", descriptor_id))
    }

    async fn remove_descriptor(&self, descriptor_id: &str) -> OpResult<()> {
        if self.descriptors.remove(descriptor_id).is_none() {
            return Err(CatalogError::not_found("descriptor", descriptor_id));
        }
        Ok(())
    }

    async fn add_instance(&self, instance: AppInstance) -> OpResult<()> {
        let id = instance.app_instance_id.clone();
        if self.instances.contains_key(&id) {
            return Err(CatalogError::already_exists("instance", id));
        }
        self.instances.insert(id, instance);
        Ok(())
    }

    async fn instance_exists(&self, instance_id: &str) -> OpResult<bool> {
        Ok(self.instances.contains_key(instance_id))
    }

    async fn get_instance(&self, instance_id: &str) -> OpResult<AppInstance> {
        self.instances
            .get(instance_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("instance", instance_id))
    }

    async fn update_instance(&self, instance: AppInstance) -> OpResult<()> {
        let mut entry = self
            .instances
            .get_mut(&instance.app_instance_id)
            .ok_or_else(|| {
                CatalogError::not_found("instance", instance.app_instance_id.clone())
            })?;
        *entry = instance;
        Ok(())
    }

    async fn remove_instance(&self, instance_id: &str) -> OpResult<()> {
        if self.instances.remove(instance_id).is_none() {
            return Err(CatalogError::not_found("instance", instance_id));
        }
        Ok(())
    }

    async fn add_endpoint(&self, endpoint: AppEndpoint) -> OpResult<()> {
        let mut entries = self
            .endpoints
            .entry(endpoint.global_fqdn.clone())
            .or_default();
        entries.retain(|existing| {
            existing.endpoint_instance.endpoint_instance_id
                != endpoint.endpoint_instance.endpoint_instance_id
        });
        entries.push(endpoint);
        Ok(())
    }

    async fn list_endpoints(&self, global_fqdn: &str) -> OpResult<Vec<AppEndpoint>> {
        let endpoints = self
            .endpoints
            .get(global_fqdn)
            .map(|entry| entry.clone())
            .unwrap_or_default();
        if endpoints.is_empty() {
            return Err(CatalogError::not_found("endpoint", global_fqdn));
        }
        Ok(endpoints)
    }

    async fn remove_endpoints(
        &self,
        organization_id: &str,
        app_instance_id: &str,
    ) -> OpResult<()> {
        for mut entry in self.endpoints.iter_mut() {
            entry.retain(|endpoint| {
                endpoint.organization_id != organization_id
                    || endpoint.app_instance_id != app_instance_id
            });
        }
        self.endpoints.retain(|_, endpoints| !endpoints.is_empty());
        Ok(())
    }

    async fn add_zt_network(&self, network: AppZtNetwork) -> OpResult<()> {
        let key = zt_key(&network.organization_id, &network.app_instance_id);
        self.zt_networks.insert(key, network);
        Ok(())
    }

    async fn get_zt_network(
        &self,
        organization_id: &str,
        app_instance_id: &str,
    ) -> OpResult<AppZtNetwork> {
        let key = zt_key(organization_id, app_instance_id);
        self.zt_networks
            .get(&key)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("zt network", key))
    }

    async fn remove_zt_network(
        &self,
        organization_id: &str,
        app_instance_id: &str,
    ) -> OpResult<()> {
        let key = zt_key(organization_id, app_instance_id);
        if self.zt_networks.remove(&key).is_none() {
            return Err(CatalogError::not_found("zt network", key));
        }
        Ok(())
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::app_network::{ConnectionInstance, ConnectionInstanceLink};
use crate::error::{CatalogError, OpResult};

/// Compound key identifying one connection between application instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    pub organization_id: String,
    pub source_instance_id: String,
    pub target_instance_id: String,
    pub inbound_name: String,
    pub outbound_name: String,
}

impl ConnectionKey {
    fn render(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.organization_id,
            self.source_instance_id,
            self.target_instance_id,
            self.inbound_name,
            self.outbound_name
        )
    }
}

impl From<&ConnectionInstance> for ConnectionKey {
    fn from(connection: &ConnectionInstance) -> Self {
        Self {
            organization_id: connection.organization_id.clone(),
            source_instance_id: connection.source_instance_id.clone(),
            target_instance_id: connection.target_instance_id.clone(),
            inbound_name: connection.inbound_name.clone(),
            outbound_name: connection.outbound_name.clone(),
        }
    }
}

/// Record store for application network connections and their per-cluster
/// links.
#[async_trait]
pub trait AppNetworkProvider: Send + Sync {
    async fn add_connection(&self, connection: ConnectionInstance) -> OpResult<()>;
    async fn connection_exists(&self, key: &ConnectionKey) -> OpResult<bool>;
    async fn get_connection(&self, key: &ConnectionKey) -> OpResult<ConnectionInstance>;
    async fn list_connections(&self, organization_id: &str) -> OpResult<Vec<ConnectionInstance>>;
    async fn remove_connection(&self, key: &ConnectionKey) -> OpResult<()>;

    async fn add_link(&self, link: ConnectionInstanceLink) -> OpResult<()>;
    async fn list_links(&self, key: &ConnectionKey) -> OpResult<Vec<ConnectionInstanceLink>>;
    async fn remove_links(&self, key: &ConnectionKey) -> OpResult<()>;
}

pub type DynAppNetworkProvider = Arc<dyn AppNetworkProvider>;

/// In-memory application network store.
pub struct InMemoryAppNetworkProvider {
    connections: DashMap<ConnectionKey, ConnectionInstance>,
    by_organization: DashMap<String, Vec<ConnectionKey>>,
    links: DashMap<ConnectionKey, Vec<ConnectionInstanceLink>>,
}

impl InMemoryAppNetworkProvider {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            by_organization: DashMap::new(),
            links: DashMap::new(),
        }
    }
}

impl Default for InMemoryAppNetworkProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppNetworkProvider for InMemoryAppNetworkProvider {
    async fn add_connection(&self, connection: ConnectionInstance) -> OpResult<()> {
        let key = ConnectionKey::from(&connection);
        if self.connections.contains_key(&key) {
            return Err(CatalogError::already_exists("connection", key.render()));
        }
        self.by_organization
            .entry(connection.organization_id.clone())
            .or_default()
            .push(key.clone());
        self.connections.insert(key, connection);
        Ok(())
    }

    async fn connection_exists(&self, key: &ConnectionKey) -> OpResult<bool> {
        Ok(self.connections.contains_key(key))
    }

    async fn get_connection(&self, key: &ConnectionKey) -> OpResult<ConnectionInstance> {
        self.connections
            .get(key)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("connection", key.render()))
    }

    async fn list_connections(&self, organization_id: &str) -> OpResult<Vec<ConnectionInstance>> {
        let Some(keys) = self.by_organization.get(organization_id) else {
            return Ok(Vec::new());
        };
        let mut connections = Vec::with_capacity(keys.len());
        for key in keys.iter() {
            if let Some(connection) = self.connections.get(key) {
                connections.push(connection.clone());
            }
        }
        Ok(connections)
    }

    async fn remove_connection(&self, key: &ConnectionKey) -> OpResult<()> {
        let Some((_, connection)) = self.connections.remove(key) else {
            return Err(CatalogError::not_found("connection", key.render()));
        };
        if let Some(mut keys) = self.by_organization.get_mut(&connection.organization_id) {
            keys.retain(|existing| existing != key);
        }
        self.links.remove(key);
        Ok(())
    }

    async fn add_link(&self, link: ConnectionInstanceLink) -> OpResult<()> {
        let key = ConnectionKey {
            organization_id: link.organization_id.clone(),
            source_instance_id: link.source_instance_id.clone(),
            target_instance_id: link.target_instance_id.clone(),
            inbound_name: link.inbound_name.clone(),
            outbound_name: link.outbound_name.clone(),
        };
        let mut links = self.links.entry(key).or_default();
        let duplicate = links.iter().any(|existing| {
            existing.source_cluster_id == link.source_cluster_id
                && existing.target_cluster_id == link.target_cluster_id
        });
        if duplicate {
            return Err(CatalogError::already_exists(
                "connection link",
                format!("{}/{}", link.source_cluster_id, link.target_cluster_id),
            ));
        }
        links.push(link);
        Ok(())
    }

    async fn list_links(&self, key: &ConnectionKey) -> OpResult<Vec<ConnectionInstanceLink>> {
        Ok(self
            .links
            .get(key)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn remove_links(&self, key: &ConnectionKey) -> OpResult<()> {
        self.links.remove(key);
        Ok(())
    }
}

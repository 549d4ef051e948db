use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::cluster::Cluster;
use crate::error::{CatalogError, OpResult};
use crate::index::RelationIndex;

/// Record store for clusters and the cluster→node relationship index.
#[async_trait]
pub trait ClusterProvider: Send + Sync {
    async fn add(&self, cluster: Cluster) -> OpResult<()>;
    async fn exists(&self, cluster_id: &str) -> OpResult<bool>;
    async fn get(&self, cluster_id: &str) -> OpResult<Cluster>;
    async fn update(&self, cluster: Cluster) -> OpResult<()>;
    async fn remove(&self, cluster_id: &str) -> OpResult<()>;

    async fn add_node(&self, cluster_id: &str, node_id: &str) -> OpResult<()>;
    async fn node_exists(&self, cluster_id: &str, node_id: &str) -> OpResult<bool>;
    async fn list_nodes(&self, cluster_id: &str) -> OpResult<Vec<String>>;
    async fn delete_node(&self, cluster_id: &str, node_id: &str) -> OpResult<()>;
}

pub type DynClusterProvider = Arc<dyn ClusterProvider>;

/// In-memory cluster store.
pub struct InMemoryClusterProvider {
    clusters: DashMap<String, Cluster>,
    nodes: RelationIndex,
}

impl InMemoryClusterProvider {
    pub fn new() -> Self {
        Self {
            clusters: DashMap::new(),
            nodes: RelationIndex::new("cluster", "node"),
        }
    }
}

impl Default for InMemoryClusterProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClusterProvider for InMemoryClusterProvider {
    async fn add(&self, cluster: Cluster) -> OpResult<()> {
        let id = cluster.cluster_id.clone();
        if self.clusters.contains_key(&id) {
            return Err(CatalogError::already_exists("cluster", id));
        }
        self.nodes.register(&id);
        self.clusters.insert(id, cluster);
        Ok(())
    }

    async fn exists(&self, cluster_id: &str) -> OpResult<bool> {
        Ok(self.clusters.contains_key(cluster_id))
    }

    async fn get(&self, cluster_id: &str) -> OpResult<Cluster> {
        self.clusters
            .get(cluster_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("cluster", cluster_id))
    }

    async fn update(&self, cluster: Cluster) -> OpResult<()> {
        let mut entry = self
            .clusters
            .get_mut(&cluster.cluster_id)
            .ok_or_else(|| CatalogError::not_found("cluster", cluster.cluster_id.clone()))?;
        *entry = cluster;
        Ok(())
    }

    async fn remove(&self, cluster_id: &str) -> OpResult<()> {
        if self.clusters.remove(cluster_id).is_none() {
            return Err(CatalogError::not_found("cluster", cluster_id));
        }
        self.nodes.unregister(cluster_id);
        Ok(())
    }

    async fn add_node(&self, cluster_id: &str, node_id: &str) -> OpResult<()> {
        self.nodes.add(cluster_id, node_id)
    }

    async fn node_exists(&self, cluster_id: &str, node_id: &str) -> OpResult<bool> {
        Ok(self.nodes.contains(cluster_id, node_id))
    }

    async fn list_nodes(&self, cluster_id: &str) -> OpResult<Vec<String>> {
        self.nodes.list(cluster_id)
    }

    async fn delete_node(&self, cluster_id: &str, node_id: &str) -> OpResult<()> {
        self.nodes.remove(cluster_id, node_id)
    }
}

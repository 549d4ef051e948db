use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::node::Node;
use crate::error::{CatalogError, OpResult};

/// Record store for nodes.
#[async_trait]
pub trait NodeProvider: Send + Sync {
    async fn add(&self, node: Node) -> OpResult<()>;
    async fn exists(&self, node_id: &str) -> OpResult<bool>;
    async fn get(&self, node_id: &str) -> OpResult<Node>;
    async fn update(&self, node: Node) -> OpResult<()>;
    async fn remove(&self, node_id: &str) -> OpResult<()>;
}

pub type DynNodeProvider = Arc<dyn NodeProvider>;

/// In-memory node store.
pub struct InMemoryNodeProvider {
    nodes: DashMap<String, Node>,
}

impl InMemoryNodeProvider {
    pub fn new() -> Self {
        Self {
            nodes: DashMap::new(),
        }
    }
}

impl Default for InMemoryNodeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeProvider for InMemoryNodeProvider {
    async fn add(&self, node: Node) -> OpResult<()> {
        let id = node.node_id.clone();
        if self.nodes.contains_key(&id) {
            return Err(CatalogError::already_exists("node", id));
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    async fn exists(&self, node_id: &str) -> OpResult<bool> {
        Ok(self.nodes.contains_key(node_id))
    }

    async fn get(&self, node_id: &str) -> OpResult<Node> {
        self.nodes
            .get(node_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("node", node_id))
    }

    async fn update(&self, node: Node) -> OpResult<()> {
        let mut entry = self
            .nodes
            .get_mut(&node.node_id)
            .ok_or_else(|| CatalogError::not_found("node", node.node_id.clone()))?;
        *entry = node;
        Ok(())
    }

    async fn remove(&self, node_id: &str) -> OpResult<()> {
        if self.nodes.remove(node_id).is_none() {
            return Err(CatalogError::not_found("node", node_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use common::api;

    use super::*;
    use crate::error::ErrorKind;

    fn node() -> Node {
        Node::new(&api::AddNodeRequest {
            organization_id: "org-1".to_string(),
            ip: "10.0.0.9".to_string(),
            labels: HashMap::new(),
        })
    }

    #[tokio::test]
    async fn add_get_update_remove_cycle() {
        let provider = InMemoryNodeProvider::new();
        let mut node = node();
        provider.add(node.clone()).await.unwrap();
        assert!(provider.exists(&node.node_id).await.unwrap());

        node.cluster_id = Some("cluster-1".to_string());
        provider.update(node.clone()).await.unwrap();
        let stored = provider.get(&node.node_id).await.unwrap();
        assert_eq!(stored.cluster_id.as_deref(), Some("cluster-1"));

        provider.remove(&node.node_id).await.unwrap();
        let err = provider.get(&node.node_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn duplicate_add_keeps_first_record() {
        let provider = InMemoryNodeProvider::new();
        let node = node();
        provider.add(node.clone()).await.unwrap();

        let mut second = node.clone();
        second.ip = "10.9.9.9".to_string();
        let err = provider.add(second).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(provider.get(&node.node_id).await.unwrap().ip, node.ip);
    }
}

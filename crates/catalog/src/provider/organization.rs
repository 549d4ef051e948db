use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::organization::Organization;
use crate::error::{CatalogError, OpResult};
use crate::index::RelationIndex;

/// Record store for organizations and the organization-scoped relationship
/// indexes (clusters, nodes, app descriptors, app instances).
#[async_trait]
pub trait OrganizationProvider: Send + Sync {
    async fn add(&self, organization: Organization) -> OpResult<()>;
    async fn exists(&self, organization_id: &str) -> OpResult<bool>;
    async fn get(&self, organization_id: &str) -> OpResult<Organization>;
    async fn update(&self, organization: Organization) -> OpResult<()>;
    async fn list(&self) -> OpResult<Vec<Organization>>;

    async fn add_cluster(&self, organization_id: &str, cluster_id: &str) -> OpResult<()>;
    async fn cluster_exists(&self, organization_id: &str, cluster_id: &str) -> OpResult<bool>;
    async fn list_clusters(&self, organization_id: &str) -> OpResult<Vec<String>>;
    async fn delete_cluster(&self, organization_id: &str, cluster_id: &str) -> OpResult<()>;

    async fn add_node(&self, organization_id: &str, node_id: &str) -> OpResult<()>;
    async fn node_exists(&self, organization_id: &str, node_id: &str) -> OpResult<bool>;
    async fn list_nodes(&self, organization_id: &str) -> OpResult<Vec<String>>;
    async fn delete_node(&self, organization_id: &str, node_id: &str) -> OpResult<()>;

    async fn add_descriptor(&self, organization_id: &str, descriptor_id: &str) -> OpResult<()>;
    async fn descriptor_exists(&self, organization_id: &str, descriptor_id: &str)
        -> OpResult<bool>;
    async fn list_descriptors(&self, organization_id: &str) -> OpResult<Vec<String>>;
    async fn delete_descriptor(&self, organization_id: &str, descriptor_id: &str) -> OpResult<()>;

    async fn add_instance(&self, organization_id: &str, instance_id: &str) -> OpResult<()>;
    async fn instance_exists(&self, organization_id: &str, instance_id: &str) -> OpResult<bool>;
    async fn list_instances(&self, organization_id: &str) -> OpResult<Vec<String>>;
    async fn delete_instance(&self, organization_id: &str, instance_id: &str) -> OpResult<()>;
}

pub type DynOrganizationProvider = Arc<dyn OrganizationProvider>;

/// In-memory organization store.
pub struct InMemoryOrganizationProvider {
    organizations: DashMap<String, Organization>,
    clusters: RelationIndex,
    nodes: RelationIndex,
    descriptors: RelationIndex,
    instances: RelationIndex,
}

impl InMemoryOrganizationProvider {
    pub fn new() -> Self {
        Self {
            organizations: DashMap::new(),
            clusters: RelationIndex::new("organization", "cluster"),
            nodes: RelationIndex::new("organization", "node"),
            descriptors: RelationIndex::new("organization", "descriptor"),
            instances: RelationIndex::new("organization", "instance"),
        }
    }
}

impl Default for InMemoryOrganizationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrganizationProvider for InMemoryOrganizationProvider {
    async fn add(&self, organization: Organization) -> OpResult<()> {
        let id = organization.organization_id.clone();
        if self.organizations.contains_key(&id) {
            return Err(CatalogError::already_exists("organization", id));
        }
        self.clusters.register(&id);
        self.nodes.register(&id);
        self.descriptors.register(&id);
        self.instances.register(&id);
        self.organizations.insert(id, organization);
        Ok(())
    }

    async fn exists(&self, organization_id: &str) -> OpResult<bool> {
        Ok(self.organizations.contains_key(organization_id))
    }

    async fn get(&self, organization_id: &str) -> OpResult<Organization> {
        self.organizations
            .get(organization_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("organization", organization_id))
    }

    async fn update(&self, organization: Organization) -> OpResult<()> {
        let mut entry = self
            .organizations
            .get_mut(&organization.organization_id)
            .ok_or_else(|| {
                CatalogError::not_found("organization", organization.organization_id.clone())
            })?;
        *entry = organization;
        Ok(())
    }

    async fn list(&self) -> OpResult<Vec<Organization>> {
        let mut organizations: Vec<Organization> =
            self.organizations.iter().map(|entry| entry.clone()).collect();
        organizations.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(organizations)
    }

    async fn add_cluster(&self, organization_id: &str, cluster_id: &str) -> OpResult<()> {
        self.clusters.add(organization_id, cluster_id)
    }

    async fn cluster_exists(&self, organization_id: &str, cluster_id: &str) -> OpResult<bool> {
        Ok(self.clusters.contains(organization_id, cluster_id))
    }

    async fn list_clusters(&self, organization_id: &str) -> OpResult<Vec<String>> {
        self.clusters.list(organization_id)
    }

    async fn delete_cluster(&self, organization_id: &str, cluster_id: &str) -> OpResult<()> {
        self.clusters.remove(organization_id, cluster_id)
    }

    async fn add_node(&self, organization_id: &str, node_id: &str) -> OpResult<()> {
        self.nodes.add(organization_id, node_id)
    }

    async fn node_exists(&self, organization_id: &str, node_id: &str) -> OpResult<bool> {
        Ok(self.nodes.contains(organization_id, node_id))
    }

    async fn list_nodes(&self, organization_id: &str) -> OpResult<Vec<String>> {
        self.nodes.list(organization_id)
    }

    async fn delete_node(&self, organization_id: &str, node_id: &str) -> OpResult<()> {
        self.nodes.remove(organization_id, node_id)
    }

    async fn add_descriptor(&self, organization_id: &str, descriptor_id: &str) -> OpResult<()> {
        self.descriptors.add(organization_id, descriptor_id)
    }

    async fn descriptor_exists(
        &self,
        organization_id: &str,
        descriptor_id: &str,
    ) -> OpResult<bool> {
        Ok(self.descriptors.contains(organization_id, descriptor_id))
    }

    async fn list_descriptors(&self, organization_id: &str) -> OpResult<Vec<String>> {
        self.descriptors.list(organization_id)
    }

    async fn delete_descriptor(&self, organization_id: &str, descriptor_id: &str) -> OpResult<()> {
        self.descriptors.remove(organization_id, descriptor_id)
    }

    async fn add_instance(&self, organization_id: &str, instance_id: &str) -> OpResult<()> {
        self.instances.add(organization_id, instance_id)
    }

    async fn instance_exists(&self, organization_id: &str, instance_id: &str) -> OpResult<bool> {
        Ok(self.instances.contains(organization_id, instance_id))
    }

    async fn list_instances(&self, organization_id: &str) -> OpResult<Vec<String>> {
        self.instances.list(organization_id)
    }

    async fn delete_instance(&self, organization_id: &str, instance_id: &str) -> OpResult<()> {
        self.instances.remove(organization_id, instance_id)
    }
}

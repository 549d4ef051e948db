use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::role::Role;
use crate::error::{CatalogError, OpResult};

/// Record store for roles, listable by organization.
#[async_trait]
pub trait RoleProvider: Send + Sync {
    async fn add(&self, role: Role) -> OpResult<()>;
    async fn exists(&self, role_id: &str) -> OpResult<bool>;
    async fn get(&self, role_id: &str) -> OpResult<Role>;
    async fn update(&self, role: Role) -> OpResult<()>;
    async fn list(&self, organization_id: &str) -> OpResult<Vec<Role>>;
    async fn remove(&self, role_id: &str) -> OpResult<()>;
}

pub type DynRoleProvider = Arc<dyn RoleProvider>;

/// In-memory role store.
pub struct InMemoryRoleProvider {
    roles: DashMap<String, Role>,
    by_organization: DashMap<String, Vec<String>>,
}

impl InMemoryRoleProvider {
    pub fn new() -> Self {
        Self {
            roles: DashMap::new(),
            by_organization: DashMap::new(),
        }
    }
}

impl Default for InMemoryRoleProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoleProvider for InMemoryRoleProvider {
    async fn add(&self, role: Role) -> OpResult<()> {
        let id = role.role_id.clone();
        if self.roles.contains_key(&id) {
            return Err(CatalogError::already_exists("role", id));
        }
        self.by_organization
            .entry(role.organization_id.clone())
            .or_default()
            .push(id.clone());
        self.roles.insert(id, role);
        Ok(())
    }

    async fn exists(&self, role_id: &str) -> OpResult<bool> {
        Ok(self.roles.contains_key(role_id))
    }

    async fn get(&self, role_id: &str) -> OpResult<Role> {
        self.roles
            .get(role_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("role", role_id))
    }

    async fn update(&self, role: Role) -> OpResult<()> {
        let mut entry = self
            .roles
            .get_mut(&role.role_id)
            .ok_or_else(|| CatalogError::not_found("role", role.role_id.clone()))?;
        *entry = role;
        Ok(())
    }

    async fn list(&self, organization_id: &str) -> OpResult<Vec<Role>> {
        let Some(ids) = self.by_organization.get(organization_id) else {
            return Ok(Vec::new());
        };
        let mut roles = Vec::with_capacity(ids.len());
        for id in ids.iter() {
            if let Some(role) = self.roles.get(id) {
                roles.push(role.clone());
            }
        }
        Ok(roles)
    }

    async fn remove(&self, role_id: &str) -> OpResult<()> {
        let Some((_, role)) = self.roles.remove(role_id) else {
            return Err(CatalogError::not_found("role", role_id));
        };
        if let Some(mut ids) = self.by_organization.get_mut(&role.organization_id) {
            ids.retain(|id| id != role_id);
        }
        Ok(())
    }
}

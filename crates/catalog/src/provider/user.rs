use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::user::User;
use crate::error::{CatalogError, OpResult};

fn user_key(organization_id: &str, email: &str) -> String {
    format!("{organization_id}/{email}")
}

/// Record store for users, keyed by (organization, email).
#[async_trait]
pub trait UserProvider: Send + Sync {
    async fn add(&self, user: User) -> OpResult<()>;
    async fn exists(&self, organization_id: &str, email: &str) -> OpResult<bool>;
    async fn get(&self, organization_id: &str, email: &str) -> OpResult<User>;
    async fn update(&self, user: User) -> OpResult<()>;
    async fn list(&self, organization_id: &str) -> OpResult<Vec<User>>;
    async fn remove(&self, organization_id: &str, email: &str) -> OpResult<()>;
}

pub type DynUserProvider = Arc<dyn UserProvider>;

/// In-memory user store.
pub struct InMemoryUserProvider {
    users: DashMap<String, User>,
    by_organization: DashMap<String, Vec<String>>,
}

impl InMemoryUserProvider {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            by_organization: DashMap::new(),
        }
    }
}

impl Default for InMemoryUserProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserProvider for InMemoryUserProvider {
    async fn add(&self, user: User) -> OpResult<()> {
        let key = user_key(&user.organization_id, &user.email);
        if self.users.contains_key(&key) {
            return Err(CatalogError::already_exists("user", key));
        }
        self.by_organization
            .entry(user.organization_id.clone())
            .or_default()
            .push(key.clone());
        self.users.insert(key, user);
        Ok(())
    }

    async fn exists(&self, organization_id: &str, email: &str) -> OpResult<bool> {
        Ok(self.users.contains_key(&user_key(organization_id, email)))
    }

    async fn get(&self, organization_id: &str, email: &str) -> OpResult<User> {
        let key = user_key(organization_id, email);
        self.users
            .get(&key)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("user", key))
    }

    async fn update(&self, user: User) -> OpResult<()> {
        let key = user_key(&user.organization_id, &user.email);
        let mut entry = self
            .users
            .get_mut(&key)
            .ok_or_else(|| CatalogError::not_found("user", key.clone()))?;
        *entry = user;
        Ok(())
    }

    async fn list(&self, organization_id: &str) -> OpResult<Vec<User>> {
        let Some(keys) = self.by_organization.get(organization_id) else {
            return Ok(Vec::new());
        };
        let mut users = Vec::with_capacity(keys.len());
        for key in keys.iter() {
            if let Some(user) = self.users.get(key) {
                users.push(user.clone());
            }
        }
        Ok(users)
    }

    async fn remove(&self, organization_id: &str, email: &str) -> OpResult<()> {
        let key = user_key(organization_id, email);
        if self.users.remove(&key).is_none() {
            return Err(CatalogError::not_found("user", key));
        }
        if let Some(mut keys) = self.by_organization.get_mut(organization_id) {
            keys.retain(|existing| existing != &key);
        }
        Ok(())
    }
}

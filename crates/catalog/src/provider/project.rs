use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::project::Project;
use crate::error::{CatalogError, OpResult};

fn project_key(owner_account_id: &str, project_id: &str) -> String {
    format!("{owner_account_id}/{project_id}")
}

/// Record store for projects, keyed by (account, project).
#[async_trait]
pub trait ProjectProvider: Send + Sync {
    async fn add(&self, project: Project) -> OpResult<()>;
    async fn exists(&self, owner_account_id: &str, project_id: &str) -> OpResult<bool>;
    async fn get(&self, owner_account_id: &str, project_id: &str) -> OpResult<Project>;
    async fn update(&self, project: Project) -> OpResult<()>;
    async fn list(&self, owner_account_id: &str) -> OpResult<Vec<Project>>;
    async fn remove(&self, owner_account_id: &str, project_id: &str) -> OpResult<()>;
}

pub type DynProjectProvider = Arc<dyn ProjectProvider>;

/// In-memory project store.
pub struct InMemoryProjectProvider {
    projects: DashMap<String, Project>,
    by_account: DashMap<String, Vec<String>>,
}

impl InMemoryProjectProvider {
    pub fn new() -> Self {
        Self {
            projects: DashMap::new(),
            by_account: DashMap::new(),
        }
    }
}

impl Default for InMemoryProjectProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectProvider for InMemoryProjectProvider {
    async fn add(&self, project: Project) -> OpResult<()> {
        let key = project_key(&project.owner_account_id, &project.project_id);
        if self.projects.contains_key(&key) {
            return Err(CatalogError::already_exists("project", key));
        }
        self.by_account
            .entry(project.owner_account_id.clone())
            .or_default()
            .push(key.clone());
        self.projects.insert(key, project);
        Ok(())
    }

    async fn exists(&self, owner_account_id: &str, project_id: &str) -> OpResult<bool> {
        Ok(self
            .projects
            .contains_key(&project_key(owner_account_id, project_id)))
    }

    async fn get(&self, owner_account_id: &str, project_id: &str) -> OpResult<Project> {
        let key = project_key(owner_account_id, project_id);
        self.projects
            .get(&key)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("project", key))
    }

    async fn update(&self, project: Project) -> OpResult<()> {
        let key = project_key(&project.owner_account_id, &project.project_id);
        let mut entry = self
            .projects
            .get_mut(&key)
            .ok_or_else(|| CatalogError::not_found("project", key.clone()))?;
        *entry = project;
        Ok(())
    }

    async fn list(&self, owner_account_id: &str) -> OpResult<Vec<Project>> {
        let Some(keys) = self.by_account.get(owner_account_id) else {
            return Ok(Vec::new());
        };
        let mut projects = Vec::with_capacity(keys.len());
        for key in keys.iter() {
            if let Some(project) = self.projects.get(key) {
                projects.push(project.clone());
            }
        }
        Ok(projects)
    }

    async fn remove(&self, owner_account_id: &str, project_id: &str) -> OpResult<()> {
        let key = project_key(owner_account_id, project_id);
        if self.projects.remove(&key).is_none() {
            return Err(CatalogError::not_found("project", key));
        }
        if let Some(mut keys) = self.by_account.get_mut(owner_account_id) {
            keys.retain(|existing| existing != &key);
        }
        Ok(())
    }
}

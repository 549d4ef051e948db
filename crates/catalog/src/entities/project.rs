use chrono::{DateTime, Utc};
use common::api;

use super::new_entity_id;

/// Project scoped by its owning account.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub owner_account_id: String,
    pub project_id: String,
    pub name: String,
    pub created: DateTime<Utc>,
}

impl Project {
    pub fn new(request: &api::AddProjectRequest) -> Self {
        Self {
            owner_account_id: request.owner_account_id.clone(),
            project_id: new_entity_id(),
            name: request.name.clone(),
            created: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, request: &api::UpdateProjectRequest) {
        if let Some(name) = &request.name {
            self.name = name.clone();
        }
    }

    pub fn to_api(&self) -> api::Project {
        api::Project {
            owner_account_id: self.owner_account_id.clone(),
            project_id: self.project_id.clone(),
            name: self.name.clone(),
            created: self.created,
        }
    }
}

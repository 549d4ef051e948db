use chrono::{DateTime, Utc};
use common::api;

use super::new_entity_id;

/// Access role inside an organization.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub organization_id: String,
    pub role_id: String,
    pub name: String,
    pub description: String,
    /// Internal roles are managed by the platform and hidden from users.
    pub internal: bool,
    pub created: DateTime<Utc>,
}

impl Role {
    pub fn new(request: &api::AddRoleRequest) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            role_id: new_entity_id(),
            name: request.name.clone(),
            description: request.description.clone(),
            internal: request.internal,
            created: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, request: &api::UpdateRoleRequest) {
        if let Some(name) = &request.name {
            self.name = name.clone();
        }
        if let Some(description) = &request.description {
            self.description = description.clone();
        }
    }

    pub fn to_api(&self) -> api::Role {
        api::Role {
            organization_id: self.organization_id.clone(),
            role_id: self.role_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            internal: self.internal,
            created: self.created,
        }
    }
}

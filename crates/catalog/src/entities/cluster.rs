use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::api;

use super::new_entity_id;

/// Compute grouping inside an organization; owns attached nodes by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub organization_id: String,
    pub cluster_id: String,
    pub name: String,
    pub hostname: String,
    pub control_plane_hostname: String,
    pub labels: HashMap<String, String>,
    pub created: DateTime<Utc>,
}

impl Cluster {
    pub fn new(request: &api::AddClusterRequest) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            cluster_id: new_entity_id(),
            name: request.name.clone(),
            hostname: request.hostname.clone(),
            control_plane_hostname: request.control_plane_hostname.clone(),
            labels: request.labels.clone(),
            created: Utc::now(),
        }
    }

    /// Apply a partial update. Labels follow the add/remove mask: add merges
    /// the request map in, remove deletes exactly the keys it names.
    pub fn apply_update(&mut self, request: &api::UpdateClusterRequest) {
        if let Some(name) = &request.name {
            self.name = name.clone();
        }
        if let Some(hostname) = &request.hostname {
            self.hostname = hostname.clone();
        }
        if let Some(control_plane_hostname) = &request.control_plane_hostname {
            self.control_plane_hostname = control_plane_hostname.clone();
        }
        if request.add_labels {
            for (key, value) in &request.labels {
                self.labels.insert(key.clone(), value.clone());
            }
        }
        if request.remove_labels {
            for key in request.labels.keys() {
                self.labels.remove(key);
            }
        }
    }

    pub fn to_api(&self) -> api::Cluster {
        api::Cluster {
            organization_id: self.organization_id.clone(),
            cluster_id: self.cluster_id.clone(),
            name: self.name.clone(),
            hostname: self.hostname.clone(),
            control_plane_hostname: self.control_plane_hostname.clone(),
            labels: self.labels.clone(),
            created: self.created,
        }
    }
}

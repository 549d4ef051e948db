use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::api;

/// Grouping key for devices inside an organization. The group id is a
/// caller-supplied natural key, not a generated identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceGroup {
    pub organization_id: String,
    pub device_group_id: String,
    pub name: String,
    pub created: DateTime<Utc>,
}

impl DeviceGroup {
    pub fn new(request: &api::AddDeviceGroupRequest) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            device_group_id: request.device_group_id.clone(),
            name: request.name.clone(),
            created: Utc::now(),
        }
    }

    pub fn to_api(&self) -> api::DeviceGroup {
        api::DeviceGroup {
            organization_id: self.organization_id.clone(),
            device_group_id: self.device_group_id.clone(),
            name: self.name.clone(),
            created: self.created,
        }
    }
}

/// Device registered under an organization-scoped group; addressable by the
/// composite key (organization, group, device).
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub organization_id: String,
    pub device_group_id: String,
    pub device_id: String,
    pub labels: HashMap<String, String>,
    pub register_since: DateTime<Utc>,
}

impl Device {
    pub fn new(request: &api::AddDeviceRequest) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            device_group_id: request.device_group_id.clone(),
            device_id: request.device_id.clone(),
            labels: request.labels.clone(),
            register_since: Utc::now(),
        }
    }

    /// Masked label update, mirroring the asset semantics.
    pub fn apply_update(&mut self, request: &api::UpdateDeviceRequest) {
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

    pub fn to_api(&self) -> api::Device {
        api::Device {
            organization_id: self.organization_id.clone(),
            device_group_id: self.device_group_id.clone(),
            device_id: self.device_id.clone(),
            labels: self.labels.clone(),
            register_since: self.register_since,
        }
    }
}

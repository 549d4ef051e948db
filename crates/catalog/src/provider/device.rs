use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::device::{Device, DeviceGroup};
use crate::error::{CatalogError, OpResult};

fn group_key(organization_id: &str, device_group_id: &str) -> String {
    format!("{organization_id}/{device_group_id}")
}

fn device_key(organization_id: &str, device_group_id: &str, device_id: &str) -> String {
    format!("{organization_id}/{device_group_id}/{device_id}")
}

/// Record store for device groups and devices. Both are addressed by
/// caller-supplied composite keys.
#[async_trait]
pub trait DeviceProvider: Send + Sync {
    async fn add_group(&self, group: DeviceGroup) -> OpResult<()>;
    async fn group_exists(&self, organization_id: &str, device_group_id: &str) -> OpResult<bool>;
    async fn get_group(
        &self,
        organization_id: &str,
        device_group_id: &str,
    ) -> OpResult<DeviceGroup>;
    async fn list_groups(&self, organization_id: &str) -> OpResult<Vec<DeviceGroup>>;
    async fn remove_group(&self, organization_id: &str, device_group_id: &str) -> OpResult<()>;

    async fn add_device(&self, device: Device) -> OpResult<()>;
    async fn device_exists(
        &self,
        organization_id: &str,
        device_group_id: &str,
        device_id: &str,
    ) -> OpResult<bool>;
    async fn get_device(
        &self,
        organization_id: &str,
        device_group_id: &str,
        device_id: &str,
    ) -> OpResult<Device>;
    async fn list_devices(
        &self,
        organization_id: &str,
        device_group_id: &str,
    ) -> OpResult<Vec<Device>>;
    async fn update_device(&self, device: Device) -> OpResult<()>;
    async fn remove_device(
        &self,
        organization_id: &str,
        device_group_id: &str,
        device_id: &str,
    ) -> OpResult<()>;
}

pub type DynDeviceProvider = Arc<dyn DeviceProvider>;

/// In-memory device store.
pub struct InMemoryDeviceProvider {
    groups: DashMap<String, DeviceGroup>,
    groups_by_organization: DashMap<String, Vec<String>>,
    devices: DashMap<String, Device>,
    devices_by_group: DashMap<String, Vec<String>>,
}

impl InMemoryDeviceProvider {
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
            groups_by_organization: DashMap::new(),
            devices: DashMap::new(),
            devices_by_group: DashMap::new(),
        }
    }
}

impl Default for InMemoryDeviceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceProvider for InMemoryDeviceProvider {
    async fn add_group(&self, group: DeviceGroup) -> OpResult<()> {
        let key = group_key(&group.organization_id, &group.device_group_id);
        if self.groups.contains_key(&key) {
            return Err(CatalogError::already_exists("device group", key));
        }
        self.groups_by_organization
            .entry(group.organization_id.clone())
            .or_default()
            .push(key.clone());
        self.devices_by_group.entry(key.clone()).or_default();
        self.groups.insert(key, group);
        Ok(())
    }

    async fn group_exists(&self, organization_id: &str, device_group_id: &str) -> OpResult<bool> {
        Ok(self
            .groups
            .contains_key(&group_key(organization_id, device_group_id)))
    }

    async fn get_group(
        &self,
        organization_id: &str,
        device_group_id: &str,
    ) -> OpResult<DeviceGroup> {
        let key = group_key(organization_id, device_group_id);
        self.groups
            .get(&key)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("device group", key))
    }

    async fn list_groups(&self, organization_id: &str) -> OpResult<Vec<DeviceGroup>> {
        let Some(keys) = self.groups_by_organization.get(organization_id) else {
            return Ok(Vec::new());
        };
        let mut groups = Vec::with_capacity(keys.len());
        for key in keys.iter() {
            if let Some(group) = self.groups.get(key) {
                groups.push(group.clone());
            }
        }
        Ok(groups)
    }

    async fn remove_group(&self, organization_id: &str, device_group_id: &str) -> OpResult<()> {
        let key = group_key(organization_id, device_group_id);
        if self.groups.remove(&key).is_none() {
            return Err(CatalogError::not_found("device group", key));
        }
        // Dropping a group drops its device partition with it.
        if let Some((_, device_keys)) = self.devices_by_group.remove(&key) {
            for device_key in device_keys {
                self.devices.remove(&device_key);
            }
        }
        if let Some(mut keys) = self.groups_by_organization.get_mut(organization_id) {
            keys.retain(|existing| existing != &key);
        }
        Ok(())
    }

    async fn add_device(&self, device: Device) -> OpResult<()> {
        let key = device_key(
            &device.organization_id,
            &device.device_group_id,
            &device.device_id,
        );
        if self.devices.contains_key(&key) {
            return Err(CatalogError::already_exists("device", key));
        }
        self.devices_by_group
            .entry(group_key(&device.organization_id, &device.device_group_id))
            .or_default()
            .push(key.clone());
        self.devices.insert(key, device);
        Ok(())
    }

    async fn device_exists(
        &self,
        organization_id: &str,
        device_group_id: &str,
        device_id: &str,
    ) -> OpResult<bool> {
        Ok(self
            .devices
            .contains_key(&device_key(organization_id, device_group_id, device_id)))
    }

    async fn get_device(
        &self,
        organization_id: &str,
        device_group_id: &str,
        device_id: &str,
    ) -> OpResult<Device> {
        let key = device_key(organization_id, device_group_id, device_id);
        self.devices
            .get(&key)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("device", key))
    }

    async fn list_devices(
        &self,
        organization_id: &str,
        device_group_id: &str,
    ) -> OpResult<Vec<Device>> {
        let Some(keys) = self
            .devices_by_group
            .get(&group_key(organization_id, device_group_id))
        else {
            return Ok(Vec::new());
        };
        let mut devices = Vec::with_capacity(keys.len());
        for key in keys.iter() {
            if let Some(device) = self.devices.get(key) {
                devices.push(device.clone());
            }
        }
        Ok(devices)
    }

    async fn update_device(&self, device: Device) -> OpResult<()> {
        let key = device_key(
            &device.organization_id,
            &device.device_group_id,
            &device.device_id,
        );
        let mut entry = self
            .devices
            .get_mut(&key)
            .ok_or_else(|| CatalogError::not_found("device", key.clone()))?;
        *entry = device;
        Ok(())
    }

    async fn remove_device(
        &self,
        organization_id: &str,
        device_group_id: &str,
        device_id: &str,
    ) -> OpResult<()> {
        let key = device_key(organization_id, device_group_id, device_id);
        if self.devices.remove(&key).is_none() {
            return Err(CatalogError::not_found("device", key));
        }
        if let Some(mut keys) = self
            .devices_by_group
            .get_mut(&group_key(organization_id, device_group_id))
        {
            keys.retain(|existing| existing != &key);
        }
        Ok(())
    }
}

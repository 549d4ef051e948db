use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::api;

use super::new_entity_id;

/// Operating system class of an asset. Determines the binary format together
/// with the architecture string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsClass {
    Linux,
    Windows,
    Darwin,
}

impl From<api::OsClass> for OsClass {
    fn from(class: api::OsClass) -> Self {
        match class {
            api::OsClass::Linux => OsClass::Linux,
            api::OsClass::Windows => OsClass::Windows,
            api::OsClass::Darwin => OsClass::Darwin,
        }
    }
}

impl From<OsClass> for api::OsClass {
    fn from(class: OsClass) -> Self {
        match class {
            OsClass::Linux => api::OsClass::Linux,
            OsClass::Windows => api::OsClass::Windows,
            OsClass::Darwin => api::OsClass::Darwin,
        }
    }
}

/// Operating system details. Name and version stay free-form so the
/// inventory can hold systems no agent build recognizes yet.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingSystemInfo {
    pub name: String,
    pub version: String,
    pub class: OsClass,
    pub architecture: String,
}

impl From<&api::OperatingSystemInfo> for OperatingSystemInfo {
    fn from(info: &api::OperatingSystemInfo) -> Self {
        Self {
            name: info.name.clone(),
            version: info.version.clone(),
            class: info.class.into(),
            architecture: info.architecture.clone(),
        }
    }
}

impl OperatingSystemInfo {
    pub fn to_api(&self) -> api::OperatingSystemInfo {
        api::OperatingSystemInfo {
            name: self.name.clone(),
            version: self.version.clone(),
            class: self.class.into(),
            architecture: self.architecture.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo {
    pub manufacturer: String,
    pub model: String,
    pub architecture: String,
    pub num_cores: i32,
}

impl From<&api::CpuInfo> for CpuInfo {
    fn from(cpu: &api::CpuInfo) -> Self {
        Self {
            manufacturer: cpu.manufacturer.clone(),
            model: cpu.model.clone(),
            architecture: cpu.architecture.clone(),
            num_cores: cpu.num_cores,
        }
    }
}

impl CpuInfo {
    pub fn to_api(&self) -> api::CpuInfo {
        api::CpuInfo {
            manufacturer: self.manufacturer.clone(),
            model: self.model.clone(),
            architecture: self.architecture.clone(),
            num_cores: self.num_cores,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkingHardwareInfo {
    pub interface_type: String,
    pub link_capacity: i64,
}

impl From<&api::NetworkingHardwareInfo> for NetworkingHardwareInfo {
    fn from(net: &api::NetworkingHardwareInfo) -> Self {
        Self {
            interface_type: net.r#type.clone(),
            link_capacity: net.link_capacity,
        }
    }
}

impl NetworkingHardwareInfo {
    pub fn to_api(&self) -> api::NetworkingHardwareInfo {
        api::NetworkingHardwareInfo {
            r#type: self.interface_type.clone(),
            link_capacity: self.link_capacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HardwareInfo {
    pub cpus: Vec<CpuInfo>,
    pub installed_ram: i64,
    pub net_interfaces: Vec<NetworkingHardwareInfo>,
}

impl From<&api::HardwareInfo> for HardwareInfo {
    fn from(hardware: &api::HardwareInfo) -> Self {
        Self {
            cpus: hardware.cpus.iter().map(CpuInfo::from).collect(),
            installed_ram: hardware.installed_ram,
            net_interfaces: hardware
                .net_interfaces
                .iter()
                .map(NetworkingHardwareInfo::from)
                .collect(),
        }
    }
}

impl HardwareInfo {
    pub fn to_api(&self) -> api::HardwareInfo {
        api::HardwareInfo {
            cpus: self.cpus.iter().map(CpuInfo::to_api).collect(),
            installed_ram: self.installed_ram,
            net_interfaces: self
                .net_interfaces
                .iter()
                .map(NetworkingHardwareInfo::to_api)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageHardwareInfo {
    pub storage_type: String,
    pub total_capacity: i64,
}

impl From<&api::StorageHardwareInfo> for StorageHardwareInfo {
    fn from(storage: &api::StorageHardwareInfo) -> Self {
        Self {
            storage_type: storage.r#type.clone(),
            total_capacity: storage.total_capacity,
        }
    }
}

impl StorageHardwareInfo {
    pub fn to_api(&self) -> api::StorageHardwareInfo {
        api::StorageHardwareInfo {
            r#type: self.storage_type.clone(),
            total_capacity: self.total_capacity,
        }
    }
}

/// Status of the last agent operation on an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentOpStatus {
    Scheduled,
    Success,
    Fail,
}

impl From<api::AgentOpStatus> for AgentOpStatus {
    fn from(status: api::AgentOpStatus) -> Self {
        match status {
            api::AgentOpStatus::Scheduled => AgentOpStatus::Scheduled,
            api::AgentOpStatus::Success => AgentOpStatus::Success,
            api::AgentOpStatus::Fail => AgentOpStatus::Fail,
        }
    }
}

impl From<AgentOpStatus> for api::AgentOpStatus {
    fn from(status: AgentOpStatus) -> Self {
        match status {
            AgentOpStatus::Scheduled => api::AgentOpStatus::Scheduled,
            AgentOpStatus::Success => api::AgentOpStatus::Success,
            AgentOpStatus::Fail => api::AgentOpStatus::Fail,
        }
    }
}

/// Result of the last agent operation executed on an asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOpSummary {
    pub operation_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: AgentOpStatus,
    pub info: String,
}

impl From<&api::AgentOpSummary> for AgentOpSummary {
    fn from(summary: &api::AgentOpSummary) -> Self {
        Self {
            operation_id: summary.operation_id.clone(),
            timestamp: summary.timestamp,
            status: summary.status.into(),
            info: summary.info.clone(),
        }
    }
}

impl AgentOpSummary {
    pub fn to_api(&self) -> api::AgentOpSummary {
        api::AgentOpSummary {
            operation_id: self.operation_id.clone(),
            timestamp: self.timestamp,
            status: self.status.into(),
            info: self.info.clone(),
        }
    }
}

/// Monitored inventory item attached to an edge controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub organization_id: String,
    pub edge_controller_id: String,
    pub asset_id: String,
    pub agent_id: String,
    /// Cleared during async uninstall so the UI stops showing the asset
    /// before the record disappears.
    pub show: bool,
    pub created: DateTime<Utc>,
    pub labels: HashMap<String, String>,
    pub os: Option<OperatingSystemInfo>,
    pub hardware: Option<HardwareInfo>,
    pub storage: Vec<StorageHardwareInfo>,
    pub eic_net_ip: String,
    pub last_op_result: Option<AgentOpSummary>,
    pub last_alive_timestamp: Option<DateTime<Utc>>,
}

impl Asset {
    pub fn new(request: &api::AddAssetRequest) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            edge_controller_id: request.edge_controller_id.clone(),
            asset_id: new_entity_id(),
            agent_id: request.agent_id.clone(),
            show: true,
            created: Utc::now(),
            labels: request.labels.clone(),
            os: request.os.as_ref().map(OperatingSystemInfo::from),
            hardware: request.hardware.as_ref().map(HardwareInfo::from),
            storage: request
                .storage
                .iter()
                .map(StorageHardwareInfo::from)
                .collect(),
            eic_net_ip: String::new(),
            last_op_result: None,
            last_alive_timestamp: None,
        }
    }

    /// Apply a field-masked update: only groups whose flag is set change.
    /// Label removal deletes exactly the keys named in the request map.
    pub fn apply_update(&mut self, request: &api::UpdateAssetRequest) {
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
        if request.update_last_ip {
            self.eic_net_ip = request.last_ip.clone();
        }
        if request.update_last_alive {
            self.last_alive_timestamp = request.last_alive_timestamp;
        }
        if request.update_last_op_summary {
            self.last_op_result = request.last_op_summary.as_ref().map(AgentOpSummary::from);
        }
    }

    pub fn to_api(&self) -> api::Asset {
        api::Asset {
            organization_id: self.organization_id.clone(),
            edge_controller_id: self.edge_controller_id.clone(),
            asset_id: self.asset_id.clone(),
            agent_id: self.agent_id.clone(),
            show: self.show,
            created: self.created,
            labels: self.labels.clone(),
            os: self.os.as_ref().map(OperatingSystemInfo::to_api),
            hardware: self.hardware.as_ref().map(HardwareInfo::to_api),
            storage: self.storage.iter().map(StorageHardwareInfo::to_api).collect(),
            eic_net_ip: self.eic_net_ip.clone(),
            last_op_result: self.last_op_result.as_ref().map(AgentOpSummary::to_api),
            last_alive_timestamp: self.last_alive_timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> Asset {
        Asset::new(&api::AddAssetRequest {
            organization_id: "org-1".to_string(),
            edge_controller_id: "eic-1".to_string(),
            agent_id: "agent-1".to_string(),
            labels: HashMap::from([("b".to_string(), "2".to_string())]),
            os: None,
            hardware: None,
            storage: Vec::new(),
        })
    }

    #[test]
    fn add_labels_merges_without_touching_existing_keys() {
        let mut asset = asset();
        asset.apply_update(&api::UpdateAssetRequest {
            organization_id: "org-1".to_string(),
            asset_id: asset.asset_id.clone(),
            add_labels: true,
            labels: HashMap::from([("a".to_string(), "1".to_string())]),
            ..Default::default()
        });
        assert_eq!(asset.labels.get("a").map(String::as_str), Some("1"));
        assert_eq!(asset.labels.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn remove_labels_deletes_only_named_keys() {
        let mut asset = asset();
        asset.labels.insert("a".to_string(), "1".to_string());
        asset.apply_update(&api::UpdateAssetRequest {
            organization_id: "org-1".to_string(),
            asset_id: asset.asset_id.clone(),
            remove_labels: true,
            labels: HashMap::from([("b".to_string(), String::new())]),
            ..Default::default()
        });
        assert_eq!(asset.labels.len(), 1);
        assert!(asset.labels.contains_key("a"));
    }

    #[test]
    fn unflagged_groups_are_left_untouched() {
        let mut asset = asset();
        asset.eic_net_ip = "10.1.1.1".to_string();
        asset.apply_update(&api::UpdateAssetRequest {
            organization_id: "org-1".to_string(),
            asset_id: asset.asset_id.clone(),
            update_last_alive: true,
            last_alive_timestamp: Some(Utc::now()),
            // last_ip present but not flagged
            last_ip: "10.9.9.9".to_string(),
            ..Default::default()
        });
        assert_eq!(asset.eic_net_ip, "10.1.1.1");
        assert!(asset.last_alive_timestamp.is_some());
    }

    #[test]
    fn op_status_round_trips_through_wire() {
        for status in [
            AgentOpStatus::Scheduled,
            AgentOpStatus::Success,
            AgentOpStatus::Fail,
        ] {
            assert_eq!(AgentOpStatus::from(api::AgentOpStatus::from(status)), status);
        }
    }
}

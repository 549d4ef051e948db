//! Wire DTOs exchanged between the catalog core and its transport adapters.
//!
//! These types are the codec-facing representation: lowercase wire enums,
//! explicit update masks, and string identifiers. The catalog core converts
//! them to and from its internal entities.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Empty success marker returned by operations without a payload.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Success {}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

/// Request to register a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOrganizationRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub zip_code: String,
}

/// Organization identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrganizationId {
    pub organization_id: String,
}

/// Partial organization update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub organization_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

/// Organization as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub organization_id: String,
    pub name: String,
    pub email: String,
    pub full_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
    pub created: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Clusters
// ---------------------------------------------------------------------------

/// Request to register a cluster inside an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddClusterRequest {
    pub organization_id: String,
    pub name: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub control_plane_hostname: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Cluster identifier scoped by organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterId {
    pub organization_id: String,
    pub cluster_id: String,
}

/// Partial cluster update. Labels use an explicit add/remove mask.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClusterRequest {
    pub organization_id: String,
    pub cluster_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub control_plane_hostname: Option<String>,
    #[serde(default)]
    pub add_labels: bool,
    #[serde(default)]
    pub remove_labels: bool,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Cluster as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub organization_id: String,
    pub cluster_id: String,
    pub name: String,
    pub hostname: String,
    pub control_plane_hostname: String,
    pub labels: HashMap<String, String>,
    pub created: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Node installation status on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Install process is running on the node.
    Installing,
    /// Node software installed and responding.
    Installed,
    /// Node is being uninstalled.
    Uninstalling,
    /// Install or runtime failure.
    Error,
}

impl NodeStatus {
    /// Returns the canonical lowercase representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Installing => "installing",
            NodeStatus::Installed => "installed",
            NodeStatus::Uninstalling => "uninstalling",
            NodeStatus::Error => "error",
        }
    }
}

/// Node membership state on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Node is known but not yet registered.
    Unregistered,
    /// Registered, not assigned to a cluster.
    Unassigned,
    /// Assigned to a cluster.
    Assigned,
}

impl NodeState {
    /// Returns the canonical lowercase representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Unregistered => "unregistered",
            NodeState::Unassigned => "unassigned",
            NodeState::Assigned => "assigned",
        }
    }
}

/// Request to register a node in an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNodeRequest {
    pub organization_id: String,
    pub ip: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Partial node update. Labels use an explicit add/remove mask.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNodeRequest {
    pub organization_id: String,
    pub node_id: String,
    #[serde(default)]
    pub add_labels: bool,
    #[serde(default)]
    pub remove_labels: bool,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub status: Option<NodeStatus>,
    #[serde(default)]
    pub state: Option<NodeState>,
}

/// Request to attach a node to a cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachNodeRequest {
    pub organization_id: String,
    pub cluster_id: String,
    pub node_id: String,
}

/// Request to remove a batch of nodes from an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveNodesRequest {
    pub organization_id: String,
    pub node_ids: Vec<String>,
}

/// Node as exposed on the wire. `cluster_id` is absent while unattached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub organization_id: String,
    pub node_id: String,
    #[serde(default)]
    pub cluster_id: Option<String>,
    pub ip: String,
    pub labels: HashMap<String, String>,
    pub status: NodeStatus,
    pub state: NodeState,
    pub created: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// Operating system class of an asset on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OsClass {
    /// Linux-family operating system.
    Linux,
    /// Windows-family operating system.
    Windows,
    /// macOS-family operating system.
    Darwin,
}

/// Operating system information reported for an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingSystemInfo {
    pub name: String,
    pub version: String,
    pub class: OsClass,
    pub architecture: String,
}

/// CPU description inside asset hardware info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuInfo {
    pub manufacturer: String,
    pub model: String,
    pub architecture: String,
    pub num_cores: i32,
}

/// Network interface description inside asset hardware info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkingHardwareInfo {
    /// Interface type, e.g. ethernet or wifi.
    pub r#type: String,
    /// Link capacity in Mbps.
    pub link_capacity: i64,
}

/// Hardware description of an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareInfo {
    #[serde(default)]
    pub cpus: Vec<CpuInfo>,
    /// Total RAM in MB.
    pub installed_ram: i64,
    #[serde(default)]
    pub net_interfaces: Vec<NetworkingHardwareInfo>,
}

/// Storage description of an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageHardwareInfo {
    pub r#type: String,
    /// Total capacity in MB.
    pub total_capacity: i64,
}

/// Result status of the last agent operation on an asset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentOpStatus {
    /// Operation accepted, not yet executed.
    Scheduled,
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Fail,
}

/// Summary of the last agent operation executed on an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOpSummary {
    pub operation_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: AgentOpStatus,
    #[serde(default)]
    pub info: String,
}

/// Request to register an inventory asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAssetRequest {
    pub organization_id: String,
    pub edge_controller_id: String,
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub os: Option<OperatingSystemInfo>,
    #[serde(default)]
    pub hardware: Option<HardwareInfo>,
    #[serde(default)]
    pub storage: Vec<StorageHardwareInfo>,
}

/// Asset identifier scoped by organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetId {
    pub organization_id: String,
    pub asset_id: String,
}

/// Field-masked asset update. Only groups whose flag is set are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssetRequest {
    pub organization_id: String,
    pub asset_id: String,
    #[serde(default)]
    pub add_labels: bool,
    #[serde(default)]
    pub remove_labels: bool,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub update_last_ip: bool,
    #[serde(default)]
    pub last_ip: String,
    #[serde(default)]
    pub update_last_alive: bool,
    #[serde(default)]
    pub last_alive_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_last_op_summary: bool,
    #[serde(default)]
    pub last_op_summary: Option<AgentOpSummary>,
}

/// Request to list assets, optionally restricted to one edge controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAssetsRequest {
    pub organization_id: String,
    #[serde(default)]
    pub edge_controller_id: Option<String>,
}

/// Asset as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub organization_id: String,
    pub edge_controller_id: String,
    pub asset_id: String,
    pub agent_id: String,
    pub show: bool,
    pub created: DateTime<Utc>,
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub os: Option<OperatingSystemInfo>,
    #[serde(default)]
    pub hardware: Option<HardwareInfo>,
    #[serde(default)]
    pub storage: Vec<StorageHardwareInfo>,
    #[serde(default)]
    pub eic_net_ip: String,
    #[serde(default)]
    pub last_op_result: Option<AgentOpSummary>,
    #[serde(default)]
    pub last_alive_timestamp: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// Request to create a device group. The group key is caller supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDeviceGroupRequest {
    pub organization_id: String,
    pub device_group_id: String,
    pub name: String,
}

/// Device group identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceGroupId {
    pub organization_id: String,
    pub device_group_id: String,
}

/// Device group as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceGroup {
    pub organization_id: String,
    pub device_group_id: String,
    pub name: String,
    pub created: DateTime<Utc>,
}

/// Request to register a device inside a group. The device key is caller
/// supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDeviceRequest {
    pub organization_id: String,
    pub device_group_id: String,
    pub device_id: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Device identifier (composite key).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceId {
    pub organization_id: String,
    pub device_group_id: String,
    pub device_id: String,
}

/// Masked device label update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDeviceRequest {
    pub organization_id: String,
    pub device_group_id: String,
    pub device_id: String,
    #[serde(default)]
    pub add_labels: bool,
    #[serde(default)]
    pub remove_labels: bool,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Device as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub organization_id: String,
    pub device_group_id: String,
    pub device_id: String,
    pub labels: HashMap<String, String>,
    pub register_since: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Applications: descriptors
// ---------------------------------------------------------------------------

/// Service runtime type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Docker container image.
    Docker,
}

/// Port access policy declared by a security rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PortAccess {
    /// Reachable by every service of the application.
    AllAppServices,
    /// Reachable by the services named in the rule.
    AppServices,
    /// Publicly reachable.
    Public,
    /// Reachable by the device groups named in the rule.
    DeviceGroup,
}

/// Collocation policy for a service group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CollocationPolicy {
    /// Deploy all group services on the same cluster.
    SameCluster,
    /// Spread group services across clusters.
    SeparateClusters,
}

/// Storage class requested by a service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Discarded when the service instance stops.
    Ephemeral,
    /// Persisted on the local cluster.
    ClusterLocal,
}

/// Endpoint protocol type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    /// Liveness probe endpoint.
    IsAlive,
    /// Web UI endpoint.
    Web,
    /// REST API endpoint.
    Rest,
    /// Prometheus metrics endpoint.
    Prometheus,
}

/// Endpoint declared on an exposed port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSpec {
    pub endpoint_type: EndpointType,
    pub path: String,
}

/// Exposed port declared by a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSpec {
    pub name: String,
    pub internal_port: i32,
    pub exposed_port: i32,
    #[serde(default)]
    pub endpoints: Vec<EndpointSpec>,
}

/// Storage request declared by a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSpec {
    /// Size in bytes.
    pub size: i64,
    pub mount_path: String,
    pub storage_type: StorageType,
}

/// Configuration file mounted into a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFileSpec {
    pub name: String,
    #[serde(default)]
    pub content: Vec<u8>,
    pub mount_path: String,
}

/// Registry credentials for a service image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCredentials {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub docker_repository: String,
}

/// Resource request for a service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploySpecs {
    pub cpu: i64,
    pub memory: i64,
    pub replicas: i32,
}

/// Deployment shape of a service group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceGroupDeploymentSpecs {
    pub replicas: i32,
    pub multi_cluster_replica: bool,
}

/// Service declared inside a descriptor group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    pub service_type: ServiceType,
    pub image: String,
    #[serde(default)]
    pub credentials: Option<ImageCredentials>,
    #[serde(default)]
    pub specs: Option<DeploySpecs>,
    #[serde(default)]
    pub storage: Vec<StorageSpec>,
    #[serde(default)]
    pub exposed_ports: Vec<PortSpec>,
    #[serde(default)]
    pub environment_variables: HashMap<String, String>,
    #[serde(default)]
    pub configs: Vec<ConfigFileSpec>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub deploy_after: Vec<String>,
    #[serde(default)]
    pub run_arguments: Vec<String>,
}

/// Group of services deployed together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceGroupSpec {
    pub name: String,
    pub services: Vec<ServiceSpec>,
    pub policy: CollocationPolicy,
    #[serde(default)]
    pub specs: Option<ServiceGroupDeploymentSpecs>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Security rule declared by a descriptor. Group/service references are by
/// name and must resolve inside the same descriptor payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityRuleSpec {
    pub name: String,
    pub target_service_group_name: String,
    pub target_service_name: String,
    pub target_port: i32,
    pub access: PortAccess,
    #[serde(default)]
    pub auth_service_group_name: String,
    #[serde(default)]
    pub auth_services: Vec<String>,
    #[serde(default)]
    pub device_group_names: Vec<String>,
}

/// Request to register an application descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAppDescriptorRequest {
    pub request_id: String,
    pub organization_id: String,
    pub name: String,
    #[serde(default)]
    pub configuration_options: HashMap<String, String>,
    #[serde(default)]
    pub environment_variables: HashMap<String, String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub rules: Vec<SecurityRuleSpec>,
    pub groups: Vec<ServiceGroupSpec>,
}

/// Application descriptor identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppDescriptorId {
    pub organization_id: String,
    pub app_descriptor_id: String,
}

/// Security rule as persisted and exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityRule {
    pub rule_id: String,
    pub name: String,
    pub target_service_group_name: String,
    pub target_service_name: String,
    pub target_port: i32,
    pub access: PortAccess,
    pub auth_service_group_name: String,
    pub auth_services: Vec<String>,
    pub device_group_names: Vec<String>,
}

/// Service with assigned identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub service_id: String,
    pub name: String,
    pub service_type: ServiceType,
    pub image: String,
    #[serde(default)]
    pub credentials: Option<ImageCredentials>,
    #[serde(default)]
    pub specs: Option<DeploySpecs>,
    #[serde(default)]
    pub storage: Vec<StorageSpec>,
    #[serde(default)]
    pub exposed_ports: Vec<PortSpec>,
    #[serde(default)]
    pub environment_variables: HashMap<String, String>,
    #[serde(default)]
    pub configs: Vec<ConfigFileSpec>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub deploy_after: Vec<String>,
    #[serde(default)]
    pub run_arguments: Vec<String>,
}

/// Service group with assigned identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceGroup {
    pub service_group_id: String,
    pub name: String,
    pub services: Vec<Service>,
    pub policy: CollocationPolicy,
    #[serde(default)]
    pub specs: Option<ServiceGroupDeploymentSpecs>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Application descriptor as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub organization_id: String,
    pub app_descriptor_id: String,
    pub name: String,
    pub configuration_options: HashMap<String, String>,
    pub environment_variables: HashMap<String, String>,
    pub labels: HashMap<String, String>,
    pub rules: Vec<SecurityRule>,
    pub groups: Vec<ServiceGroup>,
    pub created: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Applications: instances
// ---------------------------------------------------------------------------

/// Application instance lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppStatus {
    /// Accepted, waiting for planning.
    Queued,
    /// Placement being computed.
    Planning,
    /// Placement computed, waiting for deployment.
    Scheduled,
    /// Deployment in progress.
    Deploying,
    /// All services running.
    Running,
    /// Some services running, some not.
    Incomplete,
    /// Placement could not be computed.
    PlanningError,
    /// Deployment failed.
    DeploymentError,
    /// Unrecoverable error.
    Error,
}

/// Service instance lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Waiting for deployment.
    Waiting,
    /// Deployment in progress.
    Deploying,
    /// Running.
    Running,
    /// Failed.
    Error,
}

/// Request to create an application instance from a descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAppInstanceRequest {
    pub organization_id: String,
    pub app_descriptor_id: String,
    pub name: String,
}

/// Application instance identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppInstanceId {
    pub organization_id: String,
    pub app_instance_id: String,
}

/// Request to update the status of an application instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppStatusRequest {
    pub organization_id: String,
    pub app_instance_id: String,
    pub status: AppStatus,
}

/// Request to update one service instance inside an application instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateServiceStatusRequest {
    pub organization_id: String,
    pub app_instance_id: String,
    pub service_group_instance_id: String,
    pub service_instance_id: String,
    pub status: ServiceStatus,
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub deployed_on_cluster_id: String,
}

/// Request to materialize service group instances from the descriptor.
/// An empty `service_group_ids` materializes every group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddServiceGroupInstancesRequest {
    pub organization_id: String,
    pub app_instance_id: String,
    #[serde(default)]
    pub service_group_ids: Vec<String>,
}

/// Deployed realization of one service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub service_id: String,
    pub service_instance_id: String,
    pub name: String,
    pub status: ServiceStatus,
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub deployed_on_cluster_id: String,
}

/// Deployed realization of one service group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceGroupInstance {
    pub service_group_id: String,
    pub service_group_instance_id: String,
    pub name: String,
    pub service_instances: Vec<ServiceInstance>,
    pub status: ServiceStatus,
}

/// Application instance as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInstance {
    pub organization_id: String,
    pub app_instance_id: String,
    pub app_descriptor_id: String,
    pub name: String,
    pub configuration_options: HashMap<String, String>,
    pub environment_variables: HashMap<String, String>,
    pub labels: HashMap<String, String>,
    pub rules: Vec<SecurityRule>,
    pub groups: Vec<ServiceGroupInstance>,
    pub status: AppStatus,
    pub created: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Applications: endpoints and networks
// ---------------------------------------------------------------------------

/// Application endpoint protocol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEndpointProtocol {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

/// Concrete endpoint realization inside an endpoint registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInstance {
    pub endpoint_instance_id: String,
    pub endpoint_type: EndpointType,
    pub fqdn: String,
    pub port: i32,
}

/// Request to register an application endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAppEndpointRequest {
    pub organization_id: String,
    pub app_instance_id: String,
    pub service_group_instance_id: String,
    pub service_instance_id: String,
    pub service_name: String,
    pub protocol: AppEndpointProtocol,
    pub endpoint_instance: EndpointInstance,
}

/// Lookup of endpoints by derived global FQDN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAppEndpointRequest {
    pub fqdn: String,
}

/// Request to drop every endpoint of an application instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveAppEndpointsRequest {
    pub organization_id: String,
    pub app_instance_id: String,
}

/// Application endpoint as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEndpoint {
    pub organization_id: String,
    pub app_instance_id: String,
    pub service_group_instance_id: String,
    pub service_instance_id: String,
    pub service_name: String,
    pub protocol: AppEndpointProtocol,
    pub endpoint_instance: EndpointInstance,
    /// Globally unique FQDN the endpoint is addressed by.
    pub global_fqdn: String,
}

/// List of endpoints registered under one global FQDN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEndpointList {
    pub endpoints: Vec<AppEndpoint>,
}

/// Request to register the zero-trust network of an application instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAppZtNetworkRequest {
    pub organization_id: String,
    pub app_instance_id: String,
    pub network_id: String,
}

/// Request to drop the zero-trust network of an application instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveAppZtNetworkRequest {
    pub organization_id: String,
    pub app_instance_id: String,
}

/// Zero-trust network registration as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppZtNetwork {
    pub organization_id: String,
    pub app_instance_id: String,
    pub network_id: String,
}

// ---------------------------------------------------------------------------
// Application network connections
// ---------------------------------------------------------------------------

/// Status of a connection between application instances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Connection requested, not yet established.
    Waiting,
    /// Connection established.
    Established,
    /// Connection torn down.
    Terminated,
}

/// Request to connect an outbound interface to an inbound interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddConnectionRequest {
    pub organization_id: String,
    pub source_instance_id: String,
    pub target_instance_id: String,
    pub inbound_name: String,
    pub outbound_name: String,
}

/// Compound identifier of a connection between application instances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionId {
    pub organization_id: String,
    pub source_instance_id: String,
    pub target_instance_id: String,
    pub inbound_name: String,
    pub outbound_name: String,
}

/// Connection between two application instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionInstance {
    pub organization_id: String,
    pub connection_id: String,
    pub source_instance_id: String,
    pub source_instance_name: String,
    pub target_instance_id: String,
    pub target_instance_name: String,
    pub inbound_name: String,
    pub outbound_name: String,
    pub status: ConnectionStatus,
}

/// Request to record a per-cluster link realizing a connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddConnectionLinkRequest {
    pub organization_id: String,
    pub source_instance_id: String,
    pub target_instance_id: String,
    pub inbound_name: String,
    pub outbound_name: String,
    pub source_cluster_id: String,
    pub target_cluster_id: String,
}

/// Per-cluster link realizing a connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionInstanceLink {
    pub organization_id: String,
    pub connection_id: String,
    pub source_instance_id: String,
    pub source_cluster_id: String,
    pub target_instance_id: String,
    pub target_cluster_id: String,
    pub inbound_name: String,
    pub outbound_name: String,
    pub status: ConnectionStatus,
}

// ---------------------------------------------------------------------------
// Users and roles
// ---------------------------------------------------------------------------

/// Request to register a user in an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddUserRequest {
    pub organization_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: String,
}

/// User identifier (email is the natural key inside an organization).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserId {
    pub organization_id: String,
    pub email: String,
}

/// Partial user update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub organization_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// User as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub organization_id: String,
    pub email: String,
    pub name: String,
    pub photo_url: String,
    pub member_since: DateTime<Utc>,
}

/// Request to create a role in an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRoleRequest {
    pub organization_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub internal: bool,
}

/// Role identifier scoped by organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleId {
    pub organization_id: String,
    pub role_id: String,
}

/// Partial role update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub organization_id: String,
    pub role_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Role as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub organization_id: String,
    pub role_id: String,
    pub name: String,
    pub description: String,
    pub internal: bool,
    pub created: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Accounts and projects
// ---------------------------------------------------------------------------

/// Request to create a billing account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAccountRequest {
    pub name: String,
}

/// Account identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountId {
    pub account_id: String,
}

/// Partial account update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub account_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Account as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub name: String,
    pub created: DateTime<Utc>,
}

/// Request to create a project under an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProjectRequest {
    pub owner_account_id: String,
    pub name: String,
}

/// Project identifier scoped by owning account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectId {
    pub owner_account_id: String,
    pub project_id: String,
}

/// Partial project update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub owner_account_id: String,
    pub project_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Project as exposed on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub owner_account_id: String,
    pub project_id: String,
    pub name: String,
    pub created: DateTime<Utc>,
}

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use common::api;

use super::new_entity_id;
use crate::error::{CatalogError, OpResult};

/// Service runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Docker,
}

impl From<api::ServiceType> for ServiceType {
    fn from(service_type: api::ServiceType) -> Self {
        match service_type {
            api::ServiceType::Docker => ServiceType::Docker,
        }
    }
}

impl From<ServiceType> for api::ServiceType {
    fn from(service_type: ServiceType) -> Self {
        match service_type {
            ServiceType::Docker => api::ServiceType::Docker,
        }
    }
}

/// Port access policy declared by a security rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortAccess {
    AllAppServices,
    AppServices,
    Public,
    DeviceGroup,
}

impl From<api::PortAccess> for PortAccess {
    fn from(access: api::PortAccess) -> Self {
        match access {
            api::PortAccess::AllAppServices => PortAccess::AllAppServices,
            api::PortAccess::AppServices => PortAccess::AppServices,
            api::PortAccess::Public => PortAccess::Public,
            api::PortAccess::DeviceGroup => PortAccess::DeviceGroup,
        }
    }
}

impl From<PortAccess> for api::PortAccess {
    fn from(access: PortAccess) -> Self {
        match access {
            PortAccess::AllAppServices => api::PortAccess::AllAppServices,
            PortAccess::AppServices => api::PortAccess::AppServices,
            PortAccess::Public => api::PortAccess::Public,
            PortAccess::DeviceGroup => api::PortAccess::DeviceGroup,
        }
    }
}

/// Collocation policy for a service group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollocationPolicy {
    SameCluster,
    SeparateClusters,
}

impl From<api::CollocationPolicy> for CollocationPolicy {
    fn from(policy: api::CollocationPolicy) -> Self {
        match policy {
            api::CollocationPolicy::SameCluster => CollocationPolicy::SameCluster,
            api::CollocationPolicy::SeparateClusters => CollocationPolicy::SeparateClusters,
        }
    }
}

impl From<CollocationPolicy> for api::CollocationPolicy {
    fn from(policy: CollocationPolicy) -> Self {
        match policy {
            CollocationPolicy::SameCluster => api::CollocationPolicy::SameCluster,
            CollocationPolicy::SeparateClusters => api::CollocationPolicy::SeparateClusters,
        }
    }
}

/// Storage class requested by a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    Ephemeral,
    ClusterLocal,
}

impl From<api::StorageType> for StorageType {
    fn from(storage_type: api::StorageType) -> Self {
        match storage_type {
            api::StorageType::Ephemeral => StorageType::Ephemeral,
            api::StorageType::ClusterLocal => StorageType::ClusterLocal,
        }
    }
}

impl From<StorageType> for api::StorageType {
    fn from(storage_type: StorageType) -> Self {
        match storage_type {
            StorageType::Ephemeral => api::StorageType::Ephemeral,
            StorageType::ClusterLocal => api::StorageType::ClusterLocal,
        }
    }
}

/// Endpoint protocol type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointType {
    IsAlive,
    Web,
    Rest,
    Prometheus,
}

impl From<api::EndpointType> for EndpointType {
    fn from(endpoint_type: api::EndpointType) -> Self {
        match endpoint_type {
            api::EndpointType::IsAlive => EndpointType::IsAlive,
            api::EndpointType::Web => EndpointType::Web,
            api::EndpointType::Rest => EndpointType::Rest,
            api::EndpointType::Prometheus => EndpointType::Prometheus,
        }
    }
}

impl From<EndpointType> for api::EndpointType {
    fn from(endpoint_type: EndpointType) -> Self {
        match endpoint_type {
            EndpointType::IsAlive => api::EndpointType::IsAlive,
            EndpointType::Web => api::EndpointType::Web,
            EndpointType::Rest => api::EndpointType::Rest,
            EndpointType::Prometheus => api::EndpointType::Prometheus,
        }
    }
}

/// Application instance lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Queued,
    Planning,
    Scheduled,
    Deploying,
    Running,
    Incomplete,
    PlanningError,
    DeploymentError,
    Error,
}

impl From<api::AppStatus> for AppStatus {
    fn from(status: api::AppStatus) -> Self {
        match status {
            api::AppStatus::Queued => AppStatus::Queued,
            api::AppStatus::Planning => AppStatus::Planning,
            api::AppStatus::Scheduled => AppStatus::Scheduled,
            api::AppStatus::Deploying => AppStatus::Deploying,
            api::AppStatus::Running => AppStatus::Running,
            api::AppStatus::Incomplete => AppStatus::Incomplete,
            api::AppStatus::PlanningError => AppStatus::PlanningError,
            api::AppStatus::DeploymentError => AppStatus::DeploymentError,
            api::AppStatus::Error => AppStatus::Error,
        }
    }
}

impl From<AppStatus> for api::AppStatus {
    fn from(status: AppStatus) -> Self {
        match status {
            AppStatus::Queued => api::AppStatus::Queued,
            AppStatus::Planning => api::AppStatus::Planning,
            AppStatus::Scheduled => api::AppStatus::Scheduled,
            AppStatus::Deploying => api::AppStatus::Deploying,
            AppStatus::Running => api::AppStatus::Running,
            AppStatus::Incomplete => api::AppStatus::Incomplete,
            AppStatus::PlanningError => api::AppStatus::PlanningError,
            AppStatus::DeploymentError => api::AppStatus::DeploymentError,
            AppStatus::Error => api::AppStatus::Error,
        }
    }
}

/// Service instance lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Waiting,
    Deploying,
    Running,
    Error,
}

impl From<api::ServiceStatus> for ServiceStatus {
    fn from(status: api::ServiceStatus) -> Self {
        match status {
            api::ServiceStatus::Waiting => ServiceStatus::Waiting,
            api::ServiceStatus::Deploying => ServiceStatus::Deploying,
            api::ServiceStatus::Running => ServiceStatus::Running,
            api::ServiceStatus::Error => ServiceStatus::Error,
        }
    }
}

impl From<ServiceStatus> for api::ServiceStatus {
    fn from(status: ServiceStatus) -> Self {
        match status {
            ServiceStatus::Waiting => api::ServiceStatus::Waiting,
            ServiceStatus::Deploying => api::ServiceStatus::Deploying,
            ServiceStatus::Running => api::ServiceStatus::Running,
            ServiceStatus::Error => api::ServiceStatus::Error,
        }
    }
}

/// Application endpoint protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEndpointProtocol {
    Http,
    Https,
}

impl From<api::AppEndpointProtocol> for AppEndpointProtocol {
    fn from(protocol: api::AppEndpointProtocol) -> Self {
        match protocol {
            api::AppEndpointProtocol::Http => AppEndpointProtocol::Http,
            api::AppEndpointProtocol::Https => AppEndpointProtocol::Https,
        }
    }
}

impl From<AppEndpointProtocol> for api::AppEndpointProtocol {
    fn from(protocol: AppEndpointProtocol) -> Self {
        match protocol {
            AppEndpointProtocol::Http => api::AppEndpointProtocol::Http,
            AppEndpointProtocol::Https => api::AppEndpointProtocol::Https,
        }
    }
}

/// Endpoint declared on an exposed service port.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub endpoint_type: EndpointType,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    pub name: String,
    pub internal_port: i32,
    pub exposed_port: i32,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Storage {
    pub size: i64,
    pub mount_path: String,
    pub storage_type: StorageType,
}

/// Security rule with its server-assigned identifier. Target references stay
/// by name; descriptor creation guarantees they resolve.
#[derive(Debug, Clone, PartialEq)]
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

impl SecurityRule {
    fn new(rule: &api::SecurityRuleSpec) -> Self {
        Self {
            rule_id: new_entity_id(),
            name: rule.name.clone(),
            target_service_group_name: rule.target_service_group_name.clone(),
            target_service_name: rule.target_service_name.clone(),
            target_port: rule.target_port,
            access: rule.access.into(),
            auth_service_group_name: rule.auth_service_group_name.clone(),
            auth_services: rule.auth_services.clone(),
            device_group_names: rule.device_group_names.clone(),
        }
    }

    pub fn to_api(&self) -> api::SecurityRule {
        api::SecurityRule {
            rule_id: self.rule_id.clone(),
            name: self.name.clone(),
            target_service_group_name: self.target_service_group_name.clone(),
            target_service_name: self.target_service_name.clone(),
            target_port: self.target_port,
            access: self.access.into(),
            auth_service_group_name: self.auth_service_group_name.clone(),
            auth_services: self.auth_services.clone(),
            device_group_names: self.device_group_names.clone(),
        }
    }
}

/// Deployable service inside a group. Plain data carriers without enum
/// fields (credentials, specs, config files) reuse the wire types directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub service_id: String,
    pub name: String,
    pub service_type: ServiceType,
    pub image: String,
    pub credentials: Option<api::ImageCredentials>,
    pub specs: Option<api::DeploySpecs>,
    pub storage: Vec<Storage>,
    pub exposed_ports: Vec<Port>,
    pub environment_variables: HashMap<String, String>,
    pub configs: Vec<api::ConfigFileSpec>,
    pub labels: HashMap<String, String>,
    pub deploy_after: Vec<String>,
    pub run_arguments: Vec<String>,
}

impl Service {
    fn new(service: &api::ServiceSpec) -> Self {
        Self {
            service_id: new_entity_id(),
            name: service.name.clone(),
            service_type: service.service_type.into(),
            image: service.image.clone(),
            credentials: service.credentials.clone(),
            specs: service.specs,
            storage: service
                .storage
                .iter()
                .map(|storage| Storage {
                    size: storage.size,
                    mount_path: storage.mount_path.clone(),
                    storage_type: storage.storage_type.into(),
                })
                .collect(),
            exposed_ports: service
                .exposed_ports
                .iter()
                .map(|port| Port {
                    name: port.name.clone(),
                    internal_port: port.internal_port,
                    exposed_port: port.exposed_port,
                    endpoints: port
                        .endpoints
                        .iter()
                        .map(|endpoint| Endpoint {
                            endpoint_type: endpoint.endpoint_type.into(),
                            path: endpoint.path.clone(),
                        })
                        .collect(),
                })
                .collect(),
            environment_variables: service.environment_variables.clone(),
            configs: service.configs.clone(),
            labels: service.labels.clone(),
            deploy_after: service.deploy_after.clone(),
            run_arguments: service.run_arguments.clone(),
        }
    }

    pub fn to_api(&self) -> api::Service {
        api::Service {
            service_id: self.service_id.clone(),
            name: self.name.clone(),
            service_type: self.service_type.into(),
            image: self.image.clone(),
            credentials: self.credentials.clone(),
            specs: self.specs,
            storage: self
                .storage
                .iter()
                .map(|storage| api::StorageSpec {
                    size: storage.size,
                    mount_path: storage.mount_path.clone(),
                    storage_type: storage.storage_type.into(),
                })
                .collect(),
            exposed_ports: self
                .exposed_ports
                .iter()
                .map(|port| api::PortSpec {
                    name: port.name.clone(),
                    internal_port: port.internal_port,
                    exposed_port: port.exposed_port,
                    endpoints: port
                        .endpoints
                        .iter()
                        .map(|endpoint| api::EndpointSpec {
                            endpoint_type: endpoint.endpoint_type.into(),
                            path: endpoint.path.clone(),
                        })
                        .collect(),
                })
                .collect(),
            environment_variables: self.environment_variables.clone(),
            configs: self.configs.clone(),
            labels: self.labels.clone(),
            deploy_after: self.deploy_after.clone(),
            run_arguments: self.run_arguments.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceGroup {
    pub service_group_id: String,
    pub name: String,
    pub services: Vec<Service>,
    pub policy: CollocationPolicy,
    pub specs: Option<api::ServiceGroupDeploymentSpecs>,
    pub labels: HashMap<String, String>,
}

impl ServiceGroup {
    fn new(group: &api::ServiceGroupSpec) -> Self {
        Self {
            service_group_id: new_entity_id(),
            name: group.name.clone(),
            services: group.services.iter().map(Service::new).collect(),
            policy: group.policy.into(),
            specs: group.specs,
            labels: group.labels.clone(),
        }
    }

    pub fn to_api(&self) -> api::ServiceGroup {
        api::ServiceGroup {
            service_group_id: self.service_group_id.clone(),
            name: self.name.clone(),
            services: self.services.iter().map(Service::to_api).collect(),
            policy: self.policy.into(),
            specs: self.specs,
            labels: self.labels.clone(),
        }
    }
}

/// Deployable application definition.
#[derive(Debug, Clone, PartialEq)]
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

impl AppDescriptor {
    /// Build a descriptor from a validated request, assigning identifiers to
    /// the descriptor, every rule, group, and service.
    pub fn new(request: &api::AddAppDescriptorRequest) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            app_descriptor_id: new_entity_id(),
            name: request.name.clone(),
            configuration_options: request.configuration_options.clone(),
            environment_variables: request.environment_variables.clone(),
            labels: request.labels.clone(),
            rules: request.rules.iter().map(SecurityRule::new).collect(),
            groups: request.groups.iter().map(ServiceGroup::new).collect(),
            created: Utc::now(),
        }
    }

    pub fn to_api(&self) -> api::AppDescriptor {
        api::AppDescriptor {
            organization_id: self.organization_id.clone(),
            app_descriptor_id: self.app_descriptor_id.clone(),
            name: self.name.clone(),
            configuration_options: self.configuration_options.clone(),
            environment_variables: self.environment_variables.clone(),
            labels: self.labels.clone(),
            rules: self.rules.iter().map(SecurityRule::to_api).collect(),
            groups: self.groups.iter().map(ServiceGroup::to_api).collect(),
            created: self.created,
        }
    }
}

/// Check that every by-name reference inside a descriptor payload resolves
/// against the payload itself. A descriptor is accepted or rejected as a
/// whole; there is no partial persistence of valid groups.
pub fn check_descriptor_structure(request: &api::AddAppDescriptorRequest) -> OpResult<()> {
    if request.groups.is_empty() {
        return Err(CatalogError::invalid_argument(
            "descriptor requires at least one service group",
        ));
    }

    let mut services_by_group: HashMap<&str, HashSet<&str>> = HashMap::new();
    for group in &request.groups {
        if group.services.is_empty() {
            return Err(CatalogError::invalid_argument(format!(
                "service group '{}' has no services",
                group.name
            )));
        }
        let services = services_by_group.entry(group.name.as_str()).or_default();
        if !services.is_empty() {
            return Err(CatalogError::invalid_argument(format!(
                "duplicate service group name '{}'",
                group.name
            )));
        }
        for service in &group.services {
            if !services.insert(service.name.as_str()) {
                return Err(CatalogError::invalid_argument(format!(
                    "duplicate service name '{}' in group '{}'",
                    service.name, group.name
                )));
            }
        }
    }

    for rule in &request.rules {
        let Some(target_services) =
            services_by_group.get(rule.target_service_group_name.as_str())
        else {
            return Err(CatalogError::invalid_argument(format!(
                "rule '{}' targets unknown service group '{}'",
                rule.name, rule.target_service_group_name
            )));
        };
        if !target_services.contains(rule.target_service_name.as_str()) {
            return Err(CatalogError::invalid_argument(format!(
                "rule '{}' targets unknown service '{}' in group '{}'",
                rule.name, rule.target_service_name, rule.target_service_group_name
            )));
        }
        if rule.access == api::PortAccess::AppServices && !rule.auth_service_group_name.is_empty()
        {
            let Some(auth_services) =
                services_by_group.get(rule.auth_service_group_name.as_str())
            else {
                return Err(CatalogError::invalid_argument(format!(
                    "rule '{}' authorizes unknown service group '{}'",
                    rule.name, rule.auth_service_group_name
                )));
            };
            for auth_service in &rule.auth_services {
                if !auth_services.contains(auth_service.as_str()) {
                    return Err(CatalogError::invalid_argument(format!(
                        "rule '{}' authorizes unknown service '{}' in group '{}'",
                        rule.name, auth_service, rule.auth_service_group_name
                    )));
                }
            }
        }
        if rule.access == api::PortAccess::DeviceGroup {
            if rule.device_group_names.is_empty() {
                return Err(CatalogError::invalid_argument(format!(
                    "rule '{}' grants device access without device groups",
                    rule.name
                )));
            }
            for device_group in &rule.device_group_names {
                if device_group.trim().is_empty() {
                    return Err(CatalogError::invalid_argument(format!(
                        "rule '{}' names an empty device group",
                        rule.name
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Deployed realization of one service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInstance {
    pub service_id: String,
    pub service_instance_id: String,
    pub name: String,
    pub status: ServiceStatus,
    pub endpoints: Vec<String>,
    pub deployed_on_cluster_id: String,
}

impl ServiceInstance {
    pub fn to_api(&self) -> api::ServiceInstance {
        api::ServiceInstance {
            service_id: self.service_id.clone(),
            service_instance_id: self.service_instance_id.clone(),
            name: self.name.clone(),
            status: self.status.into(),
            endpoints: self.endpoints.clone(),
            deployed_on_cluster_id: self.deployed_on_cluster_id.clone(),
        }
    }
}

/// Deployed realization of one service group.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceGroupInstance {
    pub service_group_id: String,
    pub service_group_instance_id: String,
    pub name: String,
    pub service_instances: Vec<ServiceInstance>,
    pub status: ServiceStatus,
}

impl ServiceGroupInstance {
    /// Materialize a group instance from its descriptor group: fresh
    /// instance identifiers, every service starting in `Waiting`.
    pub fn materialize(group: &ServiceGroup) -> Self {
        Self {
            service_group_id: group.service_group_id.clone(),
            service_group_instance_id: new_entity_id(),
            name: group.name.clone(),
            service_instances: group
                .services
                .iter()
                .map(|service| ServiceInstance {
                    service_id: service.service_id.clone(),
                    service_instance_id: new_entity_id(),
                    name: service.name.clone(),
                    status: ServiceStatus::Waiting,
                    endpoints: Vec::new(),
                    deployed_on_cluster_id: String::new(),
                })
                .collect(),
            status: ServiceStatus::Waiting,
        }
    }

    pub fn to_api(&self) -> api::ServiceGroupInstance {
        api::ServiceGroupInstance {
            service_group_id: self.service_group_id.clone(),
            service_group_instance_id: self.service_group_instance_id.clone(),
            name: self.name.clone(),
            service_instances: self
                .service_instances
                .iter()
                .map(ServiceInstance::to_api)
                .collect(),
            status: self.status.into(),
        }
    }
}

/// Deployed realization of a descriptor. Created without group instances;
/// `ServiceGroupInstance::materialize` fills them in on demand.
#[derive(Debug, Clone, PartialEq)]
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

impl AppInstance {
    pub fn new(request: &api::AddAppInstanceRequest, descriptor: &AppDescriptor) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            app_instance_id: new_entity_id(),
            app_descriptor_id: descriptor.app_descriptor_id.clone(),
            name: request.name.clone(),
            configuration_options: descriptor.configuration_options.clone(),
            environment_variables: descriptor.environment_variables.clone(),
            labels: descriptor.labels.clone(),
            rules: descriptor.rules.clone(),
            groups: Vec::new(),
            status: AppStatus::Queued,
            created: Utc::now(),
        }
    }

    pub fn to_api(&self) -> api::AppInstance {
        api::AppInstance {
            organization_id: self.organization_id.clone(),
            app_instance_id: self.app_instance_id.clone(),
            app_descriptor_id: self.app_descriptor_id.clone(),
            name: self.name.clone(),
            configuration_options: self.configuration_options.clone(),
            environment_variables: self.environment_variables.clone(),
            labels: self.labels.clone(),
            rules: self.rules.iter().map(SecurityRule::to_api).collect(),
            groups: self.groups.iter().map(ServiceGroupInstance::to_api).collect(),
            status: self.status.into(),
            created: self.created,
        }
    }
}

/// Concrete endpoint realization registered for an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointInstance {
    pub endpoint_instance_id: String,
    pub endpoint_type: EndpointType,
    pub fqdn: String,
    pub port: i32,
}

impl From<&api::EndpointInstance> for EndpointInstance {
    fn from(endpoint: &api::EndpointInstance) -> Self {
        Self {
            endpoint_instance_id: endpoint.endpoint_instance_id.clone(),
            endpoint_type: endpoint.endpoint_type.into(),
            fqdn: endpoint.fqdn.clone(),
            port: endpoint.port,
        }
    }
}

impl EndpointInstance {
    pub fn to_api(&self) -> api::EndpointInstance {
        api::EndpointInstance {
            endpoint_instance_id: self.endpoint_instance_id.clone(),
            endpoint_type: self.endpoint_type.into(),
            fqdn: self.fqdn.clone(),
            port: self.port,
        }
    }
}

/// Application endpoint addressed by a globally unique derived FQDN.
#[derive(Debug, Clone, PartialEq)]
pub struct AppEndpoint {
    pub organization_id: String,
    pub app_instance_id: String,
    pub service_group_instance_id: String,
    pub service_instance_id: String,
    pub service_name: String,
    pub protocol: AppEndpointProtocol,
    pub endpoint_instance: EndpointInstance,
    pub global_fqdn: String,
}

impl AppEndpoint {
    pub fn new(request: &api::AddAppEndpointRequest, domain: &str) -> Self {
        let global_fqdn = derive_global_fqdn(
            &request.service_name,
            &request.service_group_instance_id,
            &request.app_instance_id,
            domain,
        );
        Self {
            organization_id: request.organization_id.clone(),
            app_instance_id: request.app_instance_id.clone(),
            service_group_instance_id: request.service_group_instance_id.clone(),
            service_instance_id: request.service_instance_id.clone(),
            service_name: request.service_name.clone(),
            protocol: request.protocol.into(),
            endpoint_instance: EndpointInstance::from(&request.endpoint_instance),
            global_fqdn,
        }
    }

    pub fn to_api(&self) -> api::AppEndpoint {
        api::AppEndpoint {
            organization_id: self.organization_id.clone(),
            app_instance_id: self.app_instance_id.clone(),
            service_group_instance_id: self.service_group_instance_id.clone(),
            service_instance_id: self.service_instance_id.clone(),
            service_name: self.service_name.clone(),
            protocol: self.protocol.into(),
            endpoint_instance: self.endpoint_instance.to_api(),
            global_fqdn: self.global_fqdn.clone(),
        }
    }
}

/// Globally unique endpoint name: the service name qualified by short
/// prefixes of the group-instance and app-instance ids under the configured
/// base domain.
pub fn derive_global_fqdn(
    service_name: &str,
    service_group_instance_id: &str,
    app_instance_id: &str,
    domain: &str,
) -> String {
    format!(
        "{}.{}.{}.{}",
        service_name,
        short_prefix(service_group_instance_id),
        short_prefix(app_instance_id),
        domain
    )
}

fn short_prefix(id: &str) -> String {
    id.chars().take(6).collect()
}

/// Zero-trust network assigned to an application instance.
#[derive(Debug, Clone, PartialEq)]
pub struct AppZtNetwork {
    pub organization_id: String,
    pub app_instance_id: String,
    pub network_id: String,
}

impl AppZtNetwork {
    pub fn to_api(&self) -> api::AppZtNetwork {
        api::AppZtNetwork {
            organization_id: self.organization_id.clone(),
            app_instance_id: self.app_instance_id.clone(),
            network_id: self.network_id.clone(),
        }
    }
}

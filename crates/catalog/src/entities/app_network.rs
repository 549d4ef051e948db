use common::api;

use super::new_entity_id;

/// Status of a connection between application instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Waiting,
    Established,
    Terminated,
}

impl From<api::ConnectionStatus> for ConnectionStatus {
    fn from(status: api::ConnectionStatus) -> Self {
        match status {
            api::ConnectionStatus::Waiting => ConnectionStatus::Waiting,
            api::ConnectionStatus::Established => ConnectionStatus::Established,
            api::ConnectionStatus::Terminated => ConnectionStatus::Terminated,
        }
    }
}

impl From<ConnectionStatus> for api::ConnectionStatus {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Waiting => api::ConnectionStatus::Waiting,
            ConnectionStatus::Established => api::ConnectionStatus::Established,
            ConnectionStatus::Terminated => api::ConnectionStatus::Terminated,
        }
    }
}

/// Connection between an outbound interface of one application instance and
/// an inbound interface of another. The store key is the compound
/// (organization, source, target, inbound, outbound) tuple.
#[derive(Debug, Clone, PartialEq)]
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

impl ConnectionInstance {
    pub fn new(
        request: &api::AddConnectionRequest,
        source_instance_name: String,
        target_instance_name: String,
    ) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            connection_id: new_entity_id(),
            source_instance_id: request.source_instance_id.clone(),
            source_instance_name,
            target_instance_id: request.target_instance_id.clone(),
            target_instance_name,
            inbound_name: request.inbound_name.clone(),
            outbound_name: request.outbound_name.clone(),
            status: ConnectionStatus::Waiting,
        }
    }

    pub fn to_api(&self) -> api::ConnectionInstance {
        api::ConnectionInstance {
            organization_id: self.organization_id.clone(),
            connection_id: self.connection_id.clone(),
            source_instance_id: self.source_instance_id.clone(),
            source_instance_name: self.source_instance_name.clone(),
            target_instance_id: self.target_instance_id.clone(),
            target_instance_name: self.target_instance_name.clone(),
            inbound_name: self.inbound_name.clone(),
            outbound_name: self.outbound_name.clone(),
            status: self.status.into(),
        }
    }
}

/// Per-cluster link realizing a connection; keyed by the connection tuple
/// extended with the source and target cluster.
#[derive(Debug, Clone, PartialEq)]
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

impl ConnectionInstanceLink {
    pub fn to_api(&self) -> api::ConnectionInstanceLink {
        api::ConnectionInstanceLink {
            organization_id: self.organization_id.clone(),
            connection_id: self.connection_id.clone(),
            source_instance_id: self.source_instance_id.clone(),
            source_cluster_id: self.source_cluster_id.clone(),
            target_instance_id: self.target_instance_id.clone(),
            target_cluster_id: self.target_cluster_id.clone(),
            inbound_name: self.inbound_name.clone(),
            outbound_name: self.outbound_name.clone(),
            status: self.status.into(),
        }
    }
}

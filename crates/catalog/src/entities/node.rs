use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::api;

use super::new_entity_id;

/// Node installation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Installing,
    Installed,
    Uninstalling,
    Error,
}

impl From<api::NodeStatus> for NodeStatus {
    fn from(status: api::NodeStatus) -> Self {
        match status {
            api::NodeStatus::Installing => NodeStatus::Installing,
            api::NodeStatus::Installed => NodeStatus::Installed,
            api::NodeStatus::Uninstalling => NodeStatus::Uninstalling,
            api::NodeStatus::Error => NodeStatus::Error,
        }
    }
}

impl From<NodeStatus> for api::NodeStatus {
    fn from(status: NodeStatus) -> Self {
        match status {
            NodeStatus::Installing => api::NodeStatus::Installing,
            NodeStatus::Installed => api::NodeStatus::Installed,
            NodeStatus::Uninstalling => api::NodeStatus::Uninstalling,
            NodeStatus::Error => api::NodeStatus::Error,
        }
    }
}

/// Node membership state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unregistered,
    Unassigned,
    Assigned,
}

impl From<api::NodeState> for NodeState {
    fn from(state: api::NodeState) -> Self {
        match state {
            api::NodeState::Unregistered => NodeState::Unregistered,
            api::NodeState::Unassigned => NodeState::Unassigned,
            api::NodeState::Assigned => NodeState::Assigned,
        }
    }
}

impl From<NodeState> for api::NodeState {
    fn from(state: NodeState) -> Self {
        match state {
            NodeState::Unregistered => api::NodeState::Unregistered,
            NodeState::Unassigned => api::NodeState::Unassigned,
            NodeState::Assigned => api::NodeState::Assigned,
        }
    }
}

/// Machine resource owned by one organization, attachable to one cluster.
///
/// `cluster_id` is `None` while unattached; the attach protocol keeps it in
/// lockstep with the owning cluster's node index.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub organization_id: String,
    pub node_id: String,
    pub cluster_id: Option<String>,
    pub ip: String,
    pub labels: HashMap<String, String>,
    pub status: NodeStatus,
    pub state: NodeState,
    pub created: DateTime<Utc>,
}

impl Node {
    pub fn new(request: &api::AddNodeRequest) -> Self {
        Self {
            organization_id: request.organization_id.clone(),
            node_id: new_entity_id(),
            cluster_id: None,
            ip: request.ip.clone(),
            labels: request.labels.clone(),
            status: NodeStatus::Installing,
            state: NodeState::Unassigned,
            created: Utc::now(),
        }
    }

    /// Apply a partial update; label groups follow the add/remove mask.
    pub fn apply_update(&mut self, request: &api::UpdateNodeRequest) {
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
        if let Some(status) = request.status {
            self.status = status.into();
        }
        if let Some(state) = request.state {
            self.state = state.into();
        }
    }

    pub fn to_api(&self) -> api::Node {
        api::Node {
            organization_id: self.organization_id.clone(),
            node_id: self.node_id.clone(),
            cluster_id: self.cluster_id.clone(),
            ip: self.ip.clone(),
            labels: self.labels.clone(),
            status: self.status.into(),
            state: self.state.into(),
            created: self.created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Node {
        Node::new(&api::AddNodeRequest {
            organization_id: "org-1".to_string(),
            ip: "10.0.0.4".to_string(),
            labels: HashMap::from([("zone".to_string(), "a".to_string())]),
        })
    }

    #[test]
    fn new_node_starts_unattached() {
        let node = node();
        assert_eq!(node.cluster_id, None);
        assert_eq!(node.state, NodeState::Unassigned);
        assert_eq!(node.status, NodeStatus::Installing);
    }

    #[test]
    fn label_add_and_remove_target_disjoint_keys() {
        let mut node = node();
        node.apply_update(&api::UpdateNodeRequest {
            organization_id: node.organization_id.clone(),
            node_id: node.node_id.clone(),
            add_labels: true,
            labels: HashMap::from([("rack".to_string(), "r2".to_string())]),
            ..Default::default()
        });
        assert_eq!(node.labels.len(), 2);

        node.apply_update(&api::UpdateNodeRequest {
            organization_id: node.organization_id.clone(),
            node_id: node.node_id.clone(),
            remove_labels: true,
            labels: HashMap::from([("zone".to_string(), String::new())]),
            ..Default::default()
        });
        assert_eq!(node.labels.len(), 1);
        assert!(node.labels.contains_key("rack"));
    }

    #[test]
    fn status_enums_round_trip_through_wire() {
        for status in [
            NodeStatus::Installing,
            NodeStatus::Installed,
            NodeStatus::Uninstalling,
            NodeStatus::Error,
        ] {
            assert_eq!(NodeStatus::from(api::NodeStatus::from(status)), status);
        }
        for state in [
            NodeState::Unregistered,
            NodeState::Unassigned,
            NodeState::Assigned,
        ] {
            assert_eq!(NodeState::from(api::NodeState::from(state)), state);
        }
    }
}

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use catalog::config::AppConfig;
use catalog::entities::node::Node;
use catalog::error::{CatalogError, OpResult};
use catalog::provider::node::{InMemoryNodeProvider, NodeProvider};
use catalog::state::CatalogState;
use common::api;

pub fn make_state() -> CatalogState {
    CatalogState::in_memory(&AppConfig::default())
}

pub async fn seed_organization(state: &CatalogState, name: &str) -> String {
    let organization = catalog::services::organizations::add_organization(
        state,
        api::AddOrganizationRequest {
            name: name.to_string(),
            email: String::new(),
            full_address: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            zip_code: String::new(),
        },
    )
    .await
    .expect("organization");
    organization.organization_id
}

pub async fn seed_cluster(state: &CatalogState, organization_id: &str, name: &str) -> String {
    let cluster = catalog::services::clusters::add_cluster(
        state,
        api::AddClusterRequest {
            organization_id: organization_id.to_string(),
            name: name.to_string(),
            hostname: format!("{name}.test"),
            control_plane_hostname: String::new(),
            labels: HashMap::new(),
        },
    )
    .await
    .expect("cluster");
    cluster.cluster_id
}

pub async fn seed_node(state: &CatalogState, organization_id: &str, ip: &str) -> String {
    let node = catalog::services::nodes::add_node(
        state,
        api::AddNodeRequest {
            organization_id: organization_id.to_string(),
            ip: ip.to_string(),
            labels: HashMap::new(),
        },
    )
    .await
    .expect("node");
    node.node_id
}

/// Node store wrapper that fails selected operations with an internal error,
/// for exercising the managers' compensation paths.
pub struct FailingNodeProvider {
    inner: InMemoryNodeProvider,
    fail_update: AtomicBool,
    fail_remove_of: Mutex<Option<String>>,
}

impl FailingNodeProvider {
    pub fn new() -> Self {
        Self {
            inner: InMemoryNodeProvider::new(),
            fail_update: AtomicBool::new(false),
            fail_remove_of: Mutex::new(None),
        }
    }

    pub fn fail_next_updates(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn fail_remove_of(&self, node_id: &str) {
        *self.fail_remove_of.lock().unwrap() = Some(node_id.to_string());
    }
}

#[async_trait]
impl NodeProvider for FailingNodeProvider {
    async fn add(&self, node: Node) -> OpResult<()> {
        self.inner.add(node).await
    }

    async fn exists(&self, node_id: &str) -> OpResult<bool> {
        self.inner.exists(node_id).await
    }

    async fn get(&self, node_id: &str) -> OpResult<Node> {
        self.inner.get(node_id).await
    }

    async fn update(&self, node: Node) -> OpResult<()> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(CatalogError::internal("injected node update failure"));
        }
        self.inner.update(node).await
    }

    async fn remove(&self, node_id: &str) -> OpResult<()> {
        let failing = self.fail_remove_of.lock().unwrap().clone();
        if failing.as_deref() == Some(node_id) {
            return Err(CatalogError::internal("injected node remove failure"));
        }
        self.inner.remove(node_id).await
    }
}

use common::api;
use tracing::debug;

use crate::entities::node::{Node, NodeState};
use crate::error::{CatalogError, OpResult};
use crate::provider::cluster::ClusterProvider;
use crate::provider::node::NodeProvider;
use crate::provider::organization::OrganizationProvider;
use crate::saga::Saga;
use crate::state::CatalogState;
use crate::validation;

pub async fn add_node(state: &CatalogState, request: api::AddNodeRequest) -> OpResult<api::Node> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("ip", &request.ip, &state.limits)?;
    validation::check_labels(&request.labels, &state.limits)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let node = Node::new(&request);
    state.nodes.add(node.clone()).await?;

    let mut saga = Saga::new("add_node");
    {
        let nodes = state.nodes.clone();
        let node_id = node.node_id.clone();
        saga.push_undo("add node record", move || async move {
            nodes.remove(&node_id).await
        });
    }
    saga.step(
        state
            .organizations
            .add_node(&node.organization_id, &node.node_id)
            .await,
    )
    .await?;
    saga.commit();

    metrics::counter!("catalog_nodes_created_total").increment(1);
    debug!(
        organization_id = %node.organization_id,
        node_id = %node.node_id,
        "node added"
    );
    Ok(node.to_api())
}

pub async fn update_node(
    state: &CatalogState,
    request: api::UpdateNodeRequest,
) -> OpResult<api::Node> {
    validation::check_labels(&request.labels, &state.limits)?;
    check_node_scope(state, &request.organization_id, &request.node_id).await?;

    let mut node = state.nodes.get(&request.node_id).await?;
    node.apply_update(&request);
    state.nodes.update(node.clone()).await?;
    Ok(node.to_api())
}

/// Link a node to a cluster.
///
/// Precondition checks mutate nothing. The mutation sequence is: detach from
/// the previous cluster's index when re-attaching, attach to the target
/// cluster's index, persist the node's own cluster reference. Each committed
/// step is undone in reverse order if a later one fails, so the node is
/// either fully attached to the target or left exactly as it was.
pub async fn attach_node(
    state: &CatalogState,
    request: api::AttachNodeRequest,
) -> OpResult<api::Success> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("cluster_id", &request.cluster_id, &state.limits)?;
    validation::require_field("node_id", &request.node_id, &state.limits)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }
    if !state
        .organizations
        .cluster_exists(&request.organization_id, &request.cluster_id)
        .await?
    {
        return Err(CatalogError::not_found("cluster", request.cluster_id));
    }
    if !state
        .organizations
        .node_exists(&request.organization_id, &request.node_id)
        .await?
    {
        return Err(CatalogError::not_found("node", request.node_id));
    }

    let node = state.nodes.get(&request.node_id).await?;
    let mut saga = Saga::new("attach_node");

    if let Some(previous_cluster) = node
        .cluster_id
        .clone()
        .filter(|previous| previous != &request.cluster_id)
    {
        // Re-attachment: the node must not linger in the old cluster's index.
        state
            .clusters
            .delete_node(&previous_cluster, &node.node_id)
            .await?;
        let clusters = state.clusters.clone();
        let node_id = node.node_id.clone();
        saga.push_undo("detach node from previous cluster", move || async move {
            clusters.add_node(&previous_cluster, &node_id).await
        });
    }

    saga.step(
        state
            .clusters
            .add_node(&request.cluster_id, &request.node_id)
            .await,
    )
    .await?;
    {
        let clusters = state.clusters.clone();
        let cluster_id = request.cluster_id.clone();
        let node_id = request.node_id.clone();
        saga.push_undo("attach node to cluster index", move || async move {
            clusters.delete_node(&cluster_id, &node_id).await
        });
    }

    let mut updated = node;
    updated.cluster_id = Some(request.cluster_id.clone());
    updated.state = NodeState::Assigned;
    saga.step(state.nodes.update(updated).await).await?;
    saga.commit();

    debug!(
        cluster_id = %request.cluster_id,
        node_id = %request.node_id,
        "node attached"
    );
    Ok(api::Success {})
}

pub async fn list_nodes(state: &CatalogState, request: api::ClusterId) -> OpResult<Vec<api::Node>> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("cluster_id", &request.cluster_id, &state.limits)?;
    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let node_ids = state.clusters.list_nodes(&request.cluster_id).await?;
    let mut nodes = Vec::with_capacity(node_ids.len());
    for node_id in &node_ids {
        nodes.push(state.nodes.get(node_id).await?.to_api());
    }
    Ok(nodes)
}

/// Remove a batch of nodes.
///
/// Nodes are processed in request order and each removal is individually
/// compensated; the batch is not atomic. A missing node id aborts the whole
/// batch: earlier nodes stay removed, the missing one is reported, later ids
/// are never attempted.
pub async fn remove_nodes(
    state: &CatalogState,
    request: api::RemoveNodesRequest,
) -> OpResult<api::Success> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::check_id_batch("node_ids", &request.node_ids, &state.limits)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    for node_id in &request.node_ids {
        let node = match state.nodes.get(node_id).await {
            Ok(node) => node,
            Err(_) => return Err(CatalogError::not_found("node", node_id.clone())),
        };

        let mut saga = Saga::new("remove_nodes");

        if let Some(cluster_id) = node.cluster_id.clone() {
            saga.step(
                state
                    .clusters
                    .delete_node(&cluster_id, &node.node_id)
                    .await
                    .map_err(|err| {
                        CatalogError::internal_caused_by(
                            format!(
                                "cannot detach node {} from cluster {}",
                                node.node_id, cluster_id
                            ),
                            err,
                        )
                    }),
            )
            .await?;
            let clusters = state.clusters.clone();
            let reattach_cluster = cluster_id.clone();
            let reattach_node = node.node_id.clone();
            saga.push_undo("detach node from cluster", move || async move {
                clusters.add_node(&reattach_cluster, &reattach_node).await
            });
        }

        saga.step(
            state
                .organizations
                .delete_node(&node.organization_id, &node.node_id)
                .await
                .map_err(|err| {
                    CatalogError::internal_caused_by(
                        format!(
                            "cannot detach node {} from organization {}",
                            node.node_id, node.organization_id
                        ),
                        err,
                    )
                }),
        )
        .await?;
        {
            let organizations = state.organizations.clone();
            let organization_id = node.organization_id.clone();
            let reattach_node = node.node_id.clone();
            saga.push_undo("detach node from organization", move || async move {
                organizations.add_node(&organization_id, &reattach_node).await
            });
        }

        saga.step(state.nodes.remove(&node.node_id).await).await?;
        saga.commit();
        metrics::counter!("catalog_nodes_removed_total").increment(1);
    }

    Ok(api::Success {})
}

async fn check_node_scope(
    state: &CatalogState,
    organization_id: &str,
    node_id: &str,
) -> OpResult<()> {
    validation::require_field("organization_id", organization_id, &state.limits)?;
    validation::require_field("node_id", node_id, &state.limits)?;
    if !state.organizations.exists(organization_id).await? {
        return Err(CatalogError::not_found("organization", organization_id));
    }
    if !state
        .organizations
        .node_exists(organization_id, node_id)
        .await?
    {
        return Err(CatalogError::not_found("node", node_id));
    }
    Ok(())
}

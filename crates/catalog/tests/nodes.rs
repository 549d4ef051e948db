#[path = "support/common.rs"]
mod support;

use std::collections::HashMap;
use std::sync::Arc;

use catalog::error::ErrorKind;
use catalog::provider::cluster::ClusterProvider;
use catalog::provider::node::NodeProvider;
use catalog::provider::organization::OrganizationProvider;
use catalog::services::nodes;
use catalog::state::CatalogState;
use common::api;
use support::{make_state, seed_cluster, seed_node, seed_organization, FailingNodeProvider};

#[tokio::test]
async fn add_node_requires_existing_organization() {
    let state = make_state();
    let err = nodes::add_node(
        &state,
        api::AddNodeRequest {
            organization_id: "org-missing".to_string(),
            ip: "10.0.0.1".to_string(),
            labels: HashMap::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn add_node_registers_in_organization_index() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let node_id = seed_node(&state, &org, "10.0.0.2").await;
    let listed = state.organizations.list_nodes(&org).await.unwrap();
    assert_eq!(listed, vec![node_id]);
}

#[tokio::test]
async fn update_node_applies_label_mask() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let node_id = seed_node(&state, &org, "10.0.0.3").await;

    let updated = nodes::update_node(
        &state,
        api::UpdateNodeRequest {
            organization_id: org.clone(),
            node_id: node_id.clone(),
            add_labels: true,
            labels: HashMap::from([("zone".to_string(), "a".to_string())]),
            status: Some(api::NodeStatus::Installed),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.labels.get("zone").map(String::as_str), Some("a"));
    assert_eq!(updated.status, api::NodeStatus::Installed);
}

#[tokio::test]
async fn attach_node_lands_in_cluster_listing() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let cluster = seed_cluster(&state, &org, "primary").await;
    let node_id = seed_node(&state, &org, "10.0.0.4").await;

    nodes::attach_node(
        &state,
        api::AttachNodeRequest {
            organization_id: org.clone(),
            cluster_id: cluster.clone(),
            node_id: node_id.clone(),
        },
    )
    .await
    .unwrap();

    let listed = nodes::list_nodes(
        &state,
        api::ClusterId {
            organization_id: org,
            cluster_id: cluster.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].node_id, node_id);
    assert_eq!(listed[0].cluster_id.as_deref(), Some(cluster.as_str()));
    assert_eq!(listed[0].state, api::NodeState::Assigned);
}

#[tokio::test]
async fn attach_to_unknown_cluster_mutates_nothing() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let node_id = seed_node(&state, &org, "10.0.0.5").await;

    let err = nodes::attach_node(
        &state,
        api::AttachNodeRequest {
            organization_id: org.clone(),
            cluster_id: "cluster-missing".to_string(),
            node_id: node_id.clone(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // Node record untouched.
    let node = state.nodes.get(&node_id).await.unwrap();
    assert_eq!(node.cluster_id, None);
}

#[tokio::test]
async fn reattach_moves_node_between_cluster_indexes() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let cluster_a = seed_cluster(&state, &org, "a").await;
    let cluster_b = seed_cluster(&state, &org, "b").await;
    let node_id = seed_node(&state, &org, "10.0.0.6").await;

    for cluster in [&cluster_a, &cluster_b] {
        nodes::attach_node(
            &state,
            api::AttachNodeRequest {
                organization_id: org.clone(),
                cluster_id: cluster.clone(),
                node_id: node_id.clone(),
            },
        )
        .await
        .unwrap();
    }

    let in_a = nodes::list_nodes(
        &state,
        api::ClusterId {
            organization_id: org.clone(),
            cluster_id: cluster_a,
        },
    )
    .await
    .unwrap();
    assert!(in_a.is_empty());

    let in_b = nodes::list_nodes(
        &state,
        api::ClusterId {
            organization_id: org,
            cluster_id: cluster_b.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(in_b.len(), 1);
    assert_eq!(in_b[0].cluster_id.as_deref(), Some(cluster_b.as_str()));
}

#[tokio::test]
async fn attach_rollback_clears_cluster_index_when_record_update_fails() {
    let failing_nodes = Arc::new(FailingNodeProvider::new());
    let state = CatalogState {
        nodes: failing_nodes.clone(),
        ..make_state()
    };
    let org = seed_organization(&state, "acme").await;
    let cluster = seed_cluster(&state, &org, "primary").await;
    let node_id = seed_node(&state, &org, "10.0.0.7").await;

    failing_nodes.fail_next_updates(true);
    let err = nodes::attach_node(
        &state,
        api::AttachNodeRequest {
            organization_id: org.clone(),
            cluster_id: cluster.clone(),
            node_id: node_id.clone(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    failing_nodes.fail_next_updates(false);

    // Compensation removed the node from the cluster index again.
    let listed = nodes::list_nodes(
        &state,
        api::ClusterId {
            organization_id: org,
            cluster_id: cluster,
        },
    )
    .await
    .unwrap();
    assert!(listed.is_empty());
    let node = state.nodes.get(&node_id).await.unwrap();
    assert_eq!(node.cluster_id, None);
}

#[tokio::test]
async fn list_nodes_on_empty_cluster_returns_empty() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let cluster = seed_cluster(&state, &org, "empty").await;

    let listed = nodes::list_nodes(
        &state,
        api::ClusterId {
            organization_id: org,
            cluster_id: cluster,
        },
    )
    .await
    .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn remove_nodes_detaches_from_cluster_and_organization() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let cluster = seed_cluster(&state, &org, "primary").await;
    let node_id = seed_node(&state, &org, "10.0.0.8").await;
    nodes::attach_node(
        &state,
        api::AttachNodeRequest {
            organization_id: org.clone(),
            cluster_id: cluster.clone(),
            node_id: node_id.clone(),
        },
    )
    .await
    .unwrap();

    nodes::remove_nodes(
        &state,
        api::RemoveNodesRequest {
            organization_id: org.clone(),
            node_ids: vec![node_id.clone()],
        },
    )
    .await
    .unwrap();

    assert!(state.clusters.list_nodes(&cluster).await.unwrap().is_empty());
    assert!(state.organizations.list_nodes(&org).await.unwrap().is_empty());
    assert_eq!(
        state.nodes.get(&node_id).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[tokio::test]
async fn remove_nodes_aborts_batch_on_missing_id() {
    let state = make_state();
    let org = seed_organization(&state, "acme").await;
    let n1 = seed_node(&state, &org, "10.0.1.1").await;
    let n3 = seed_node(&state, &org, "10.0.1.3").await;

    let err = nodes::remove_nodes(
        &state,
        api::RemoveNodesRequest {
            organization_id: org.clone(),
            node_ids: vec![n1.clone(), "node-missing".to_string(), n3.clone()],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // n1 was processed before the abort and stays removed; n3 was never
    // attempted.
    assert!(!state.nodes.exists(&n1).await.unwrap());
    assert!(state.nodes.exists(&n3).await.unwrap());
    assert_eq!(state.organizations.list_nodes(&org).await.unwrap(), vec![n3]);
}

#[tokio::test]
async fn remove_nodes_compensates_failed_node_and_stops() {
    let failing_nodes = Arc::new(FailingNodeProvider::new());
    let state = CatalogState {
        nodes: failing_nodes.clone(),
        ..make_state()
    };
    let org = seed_organization(&state, "acme").await;
    let cluster = seed_cluster(&state, &org, "primary").await;
    let n1 = seed_node(&state, &org, "10.0.2.1").await;
    let n2 = seed_node(&state, &org, "10.0.2.2").await;
    let n3 = seed_node(&state, &org, "10.0.2.3").await;
    for node_id in [&n1, &n2, &n3] {
        nodes::attach_node(
            &state,
            api::AttachNodeRequest {
                organization_id: org.clone(),
                cluster_id: cluster.clone(),
                node_id: node_id.clone(),
            },
        )
        .await
        .unwrap();
    }

    failing_nodes.fail_remove_of(&n2);
    let err = nodes::remove_nodes(
        &state,
        api::RemoveNodesRequest {
            organization_id: org.clone(),
            node_ids: vec![n1.clone(), n2.clone(), n3.clone()],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    // n1 fully removed.
    assert!(!state.nodes.exists(&n1).await.unwrap());
    // n2 restored to its pre-removal index state.
    assert!(state.nodes.exists(&n2).await.unwrap());
    assert!(state.clusters.node_exists(&cluster, &n2).await.unwrap());
    assert!(state.organizations.node_exists(&org, &n2).await.unwrap());
    // n3 never attempted.
    assert!(state.nodes.exists(&n3).await.unwrap());
    assert!(state.clusters.node_exists(&cluster, &n3).await.unwrap());
}

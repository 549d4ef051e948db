use common::api;
use tracing::debug;

use crate::entities::cluster::Cluster;
use crate::error::{CatalogError, OpResult};
use crate::provider::cluster::ClusterProvider;
use crate::provider::organization::OrganizationProvider;
use crate::saga::Saga;
use crate::state::CatalogState;
use crate::validation;

pub async fn add_cluster(
    state: &CatalogState,
    request: api::AddClusterRequest,
) -> OpResult<api::Cluster> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("name", &request.name, &state.limits)?;
    validation::check_len("hostname", &request.hostname, &state.limits)?;
    validation::check_labels(&request.labels, &state.limits)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let cluster = Cluster::new(&request);
    state.clusters.add(cluster.clone()).await?;

    let mut saga = Saga::new("add_cluster");
    {
        let clusters = state.clusters.clone();
        let cluster_id = cluster.cluster_id.clone();
        saga.push_undo("add cluster record", move || async move {
            clusters.remove(&cluster_id).await
        });
    }
    saga.step(
        state
            .organizations
            .add_cluster(&cluster.organization_id, &cluster.cluster_id)
            .await,
    )
    .await?;
    saga.commit();

    debug!(
        organization_id = %cluster.organization_id,
        cluster_id = %cluster.cluster_id,
        "cluster added"
    );
    Ok(cluster.to_api())
}

pub async fn get_cluster(state: &CatalogState, request: api::ClusterId) -> OpResult<api::Cluster> {
    check_cluster_scope(state, &request.organization_id, &request.cluster_id).await?;
    let cluster = state.clusters.get(&request.cluster_id).await?;
    Ok(cluster.to_api())
}

pub async fn update_cluster(
    state: &CatalogState,
    request: api::UpdateClusterRequest,
) -> OpResult<api::Cluster> {
    validation::check_labels(&request.labels, &state.limits)?;
    if let Some(name) = &request.name {
        validation::require_field("name", name, &state.limits)?;
    }
    check_cluster_scope(state, &request.organization_id, &request.cluster_id).await?;

    let mut cluster = state.clusters.get(&request.cluster_id).await?;
    cluster.apply_update(&request);
    state.clusters.update(cluster.clone()).await?;
    Ok(cluster.to_api())
}

pub async fn list_clusters(
    state: &CatalogState,
    request: api::OrganizationId,
) -> OpResult<Vec<api::Cluster>> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let cluster_ids = state
        .organizations
        .list_clusters(&request.organization_id)
        .await?;
    let mut clusters = Vec::with_capacity(cluster_ids.len());
    for cluster_id in &cluster_ids {
        clusters.push(state.clusters.get(cluster_id).await?.to_api());
    }
    Ok(clusters)
}

/// Remove a cluster. Refused while nodes remain attached; detach or remove
/// the nodes first.
pub async fn remove_cluster(
    state: &CatalogState,
    request: api::ClusterId,
) -> OpResult<api::Success> {
    check_cluster_scope(state, &request.organization_id, &request.cluster_id).await?;

    let attached = state.clusters.list_nodes(&request.cluster_id).await?;
    if !attached.is_empty() {
        return Err(CatalogError::invalid_argument(format!(
            "cluster {} still has {} attached nodes",
            request.cluster_id,
            attached.len()
        )));
    }

    let mut saga = Saga::new("remove_cluster");
    state
        .organizations
        .delete_cluster(&request.organization_id, &request.cluster_id)
        .await?;
    {
        let organizations = state.organizations.clone();
        let organization_id = request.organization_id.clone();
        let cluster_id = request.cluster_id.clone();
        saga.push_undo("detach cluster from organization", move || async move {
            organizations.add_cluster(&organization_id, &cluster_id).await
        });
    }
    saga.step(state.clusters.remove(&request.cluster_id).await)
        .await?;
    saga.commit();
    Ok(api::Success {})
}

/// Shared precondition: the organization exists and the cluster is listed
/// under it.
async fn check_cluster_scope(
    state: &CatalogState,
    organization_id: &str,
    cluster_id: &str,
) -> OpResult<()> {
    validation::require_field("organization_id", organization_id, &state.limits)?;
    validation::require_field("cluster_id", cluster_id, &state.limits)?;
    if !state.organizations.exists(organization_id).await? {
        return Err(CatalogError::not_found("organization", organization_id));
    }
    if !state
        .organizations
        .cluster_exists(organization_id, cluster_id)
        .await?
    {
        return Err(CatalogError::not_found("cluster", cluster_id));
    }
    Ok(())
}

use common::api;

use crate::entities::app_network::{ConnectionInstance, ConnectionInstanceLink};
use crate::error::{CatalogError, OpResult};
use crate::provider::app_network::{AppNetworkProvider, ConnectionKey};
use crate::provider::application::ApplicationProvider;
use crate::provider::organization::OrganizationProvider;
use crate::state::CatalogState;
use crate::validation;

/// Connect an outbound interface of one application instance to an inbound
/// interface of another.
pub async fn add_connection(
    state: &CatalogState,
    request: api::AddConnectionRequest,
) -> OpResult<api::ConnectionInstance> {
    check_connection_fields(
        state,
        &request.organization_id,
        &request.source_instance_id,
        &request.target_instance_id,
        &request.inbound_name,
        &request.outbound_name,
    )?;
    check_organization(state, &request.organization_id).await?;

    for instance_id in [&request.source_instance_id, &request.target_instance_id] {
        if !state
            .organizations
            .instance_exists(&request.organization_id, instance_id)
            .await?
        {
            return Err(CatalogError::not_found("instance", instance_id.clone()));
        }
    }

    let source = state
        .applications
        .get_instance(&request.source_instance_id)
        .await?;
    let target = state
        .applications
        .get_instance(&request.target_instance_id)
        .await?;

    let connection = ConnectionInstance::new(&request, source.name, target.name);
    state.app_network.add_connection(connection.clone()).await?;
    Ok(connection.to_api())
}

pub async fn get_connection(
    state: &CatalogState,
    request: api::ConnectionId,
) -> OpResult<api::ConnectionInstance> {
    check_connection_fields(
        state,
        &request.organization_id,
        &request.source_instance_id,
        &request.target_instance_id,
        &request.inbound_name,
        &request.outbound_name,
    )?;
    check_organization(state, &request.organization_id).await?;
    let connection = state.app_network.get_connection(&key_of(&request)).await?;
    Ok(connection.to_api())
}

pub async fn list_connections(
    state: &CatalogState,
    request: api::OrganizationId,
) -> OpResult<Vec<api::ConnectionInstance>> {
    check_organization(state, &request.organization_id).await?;
    let connections = state
        .app_network
        .list_connections(&request.organization_id)
        .await?;
    Ok(connections
        .iter()
        .map(ConnectionInstance::to_api)
        .collect())
}

/// Remove a connection together with the links realizing it. Links are
/// rebuildable realization data, so they go first and are not compensated if
/// the connection removal then fails.
pub async fn remove_connection(
    state: &CatalogState,
    request: api::ConnectionId,
) -> OpResult<api::Success> {
    check_connection_fields(
        state,
        &request.organization_id,
        &request.source_instance_id,
        &request.target_instance_id,
        &request.inbound_name,
        &request.outbound_name,
    )?;
    check_organization(state, &request.organization_id).await?;
    let key = key_of(&request);
    if !state.app_network.connection_exists(&key).await? {
        return Err(CatalogError::not_found(
            "connection",
            request.source_instance_id,
        ));
    }
    state.app_network.remove_links(&key).await?;
    state.app_network.remove_connection(&key).await?;
    Ok(api::Success {})
}

/// Record a per-cluster link realizing an established connection.
pub async fn add_connection_link(
    state: &CatalogState,
    request: api::AddConnectionLinkRequest,
) -> OpResult<api::ConnectionInstanceLink> {
    check_connection_fields(
        state,
        &request.organization_id,
        &request.source_instance_id,
        &request.target_instance_id,
        &request.inbound_name,
        &request.outbound_name,
    )?;
    validation::require_field("source_cluster_id", &request.source_cluster_id, &state.limits)?;
    validation::require_field("target_cluster_id", &request.target_cluster_id, &state.limits)?;
    check_organization(state, &request.organization_id).await?;

    let key = ConnectionKey {
        organization_id: request.organization_id.clone(),
        source_instance_id: request.source_instance_id.clone(),
        target_instance_id: request.target_instance_id.clone(),
        inbound_name: request.inbound_name.clone(),
        outbound_name: request.outbound_name.clone(),
    };
    let connection = state.app_network.get_connection(&key).await?;

    let link = ConnectionInstanceLink {
        organization_id: request.organization_id,
        connection_id: connection.connection_id,
        source_instance_id: request.source_instance_id,
        source_cluster_id: request.source_cluster_id,
        target_instance_id: request.target_instance_id,
        target_cluster_id: request.target_cluster_id,
        inbound_name: request.inbound_name,
        outbound_name: request.outbound_name,
        status: connection.status,
    };
    state.app_network.add_link(link.clone()).await?;
    Ok(link.to_api())
}

pub async fn list_connection_links(
    state: &CatalogState,
    request: api::ConnectionId,
) -> OpResult<Vec<api::ConnectionInstanceLink>> {
    check_organization(state, &request.organization_id).await?;
    let key = key_of(&request);
    if !state.app_network.connection_exists(&key).await? {
        return Err(CatalogError::not_found(
            "connection",
            request.source_instance_id,
        ));
    }
    let links = state.app_network.list_links(&key).await?;
    Ok(links.iter().map(|link| link.to_api()).collect())
}

fn key_of(request: &api::ConnectionId) -> ConnectionKey {
    ConnectionKey {
        organization_id: request.organization_id.clone(),
        source_instance_id: request.source_instance_id.clone(),
        target_instance_id: request.target_instance_id.clone(),
        inbound_name: request.inbound_name.clone(),
        outbound_name: request.outbound_name.clone(),
    }
}

fn check_connection_fields(
    state: &CatalogState,
    organization_id: &str,
    source_instance_id: &str,
    target_instance_id: &str,
    inbound_name: &str,
    outbound_name: &str,
) -> OpResult<()> {
    validation::require_field("organization_id", organization_id, &state.limits)?;
    validation::require_field("source_instance_id", source_instance_id, &state.limits)?;
    validation::require_field("target_instance_id", target_instance_id, &state.limits)?;
    validation::require_field("inbound_name", inbound_name, &state.limits)?;
    validation::require_field("outbound_name", outbound_name, &state.limits)?;
    Ok(())
}

async fn check_organization(state: &CatalogState, organization_id: &str) -> OpResult<()> {
    validation::require_field("organization_id", organization_id, &state.limits)?;
    if !state.organizations.exists(organization_id).await? {
        return Err(CatalogError::not_found("organization", organization_id));
    }
    Ok(())
}

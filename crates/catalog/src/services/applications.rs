use common::api;
use tracing::{debug, warn};

use crate::entities::application::{
    self, AppDescriptor, AppEndpoint, AppInstance, AppZtNetwork, ServiceGroupInstance,
};
use crate::error::{CatalogError, ErrorKind, OpResult};
use crate::provider::application::ApplicationProvider;
use crate::provider::organization::OrganizationProvider;
use crate::saga::Saga;
use crate::state::CatalogState;
use crate::validation;

/// Register an application descriptor.
///
/// The descriptor payload is validated as a whole before anything persists:
/// every security rule's group/service/auth references must resolve against
/// the groups declared in the same request.
pub async fn add_app_descriptor(
    state: &CatalogState,
    request: api::AddAppDescriptorRequest,
) -> OpResult<api::AppDescriptor> {
    validation::require_field("request_id", &request.request_id, &state.limits)?;
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("name", &request.name, &state.limits)?;
    validation::check_labels(&request.labels, &state.limits)?;
    application::check_descriptor_structure(&request)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let descriptor = AppDescriptor::new(&request);
    state.applications.add_descriptor(descriptor.clone()).await?;

    let mut saga = Saga::new("add_app_descriptor");
    {
        let applications = state.applications.clone();
        let descriptor_id = descriptor.app_descriptor_id.clone();
        saga.push_undo("add descriptor record", move || async move {
            applications.remove_descriptor(&descriptor_id).await
        });
    }
    saga.step(
        state
            .organizations
            .add_descriptor(&descriptor.organization_id, &descriptor.app_descriptor_id)
            .await,
    )
    .await?;
    saga.commit();

    debug!(
        organization_id = %descriptor.organization_id,
        app_descriptor_id = %descriptor.app_descriptor_id,
        "application descriptor added"
    );
    Ok(descriptor.to_api())
}

pub async fn get_app_descriptor(
    state: &CatalogState,
    request: api::AppDescriptorId,
) -> OpResult<api::AppDescriptor> {
    check_descriptor_scope(state, &request.organization_id, &request.app_descriptor_id).await?;
    let descriptor = state
        .applications
        .get_descriptor(&request.app_descriptor_id)
        .await?;
    Ok(descriptor.to_api())
}

pub async fn list_app_descriptors(
    state: &CatalogState,
    request: api::OrganizationId,
) -> OpResult<Vec<api::AppDescriptor>> {
    check_organization(state, &request.organization_id).await?;
    let descriptor_ids = state
        .organizations
        .list_descriptors(&request.organization_id)
        .await?;
    let mut descriptors = Vec::with_capacity(descriptor_ids.len());
    for descriptor_id in &descriptor_ids {
        descriptors.push(state.applications.get_descriptor(descriptor_id).await?.to_api());
    }
    Ok(descriptors)
}

pub async fn remove_app_descriptor(
    state: &CatalogState,
    request: api::AppDescriptorId,
) -> OpResult<api::Success> {
    check_descriptor_scope(state, &request.organization_id, &request.app_descriptor_id).await?;

    let mut saga = Saga::new("remove_app_descriptor");
    state
        .organizations
        .delete_descriptor(&request.organization_id, &request.app_descriptor_id)
        .await?;
    {
        let organizations = state.organizations.clone();
        let organization_id = request.organization_id.clone();
        let descriptor_id = request.app_descriptor_id.clone();
        saga.push_undo("detach descriptor from organization", move || async move {
            organizations
                .add_descriptor(&organization_id, &descriptor_id)
                .await
        });
    }
    saga.step(
        state
            .applications
            .remove_descriptor(&request.app_descriptor_id)
            .await,
    )
    .await?;
    saga.commit();
    Ok(api::Success {})
}

pub async fn add_app_instance(
    state: &CatalogState,
    request: api::AddAppInstanceRequest,
) -> OpResult<api::AppInstance> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("app_descriptor_id", &request.app_descriptor_id, &state.limits)?;
    validation::require_field("name", &request.name, &state.limits)?;

    check_descriptor_scope(state, &request.organization_id, &request.app_descriptor_id).await?;
    let descriptor = state
        .applications
        .get_descriptor(&request.app_descriptor_id)
        .await?;

    let instance = AppInstance::new(&request, &descriptor);
    state.applications.add_instance(instance.clone()).await?;

    let mut saga = Saga::new("add_app_instance");
    {
        let applications = state.applications.clone();
        let instance_id = instance.app_instance_id.clone();
        saga.push_undo("add instance record", move || async move {
            applications.remove_instance(&instance_id).await
        });
    }
    saga.step(
        state
            .organizations
            .add_instance(&instance.organization_id, &instance.app_instance_id)
            .await,
    )
    .await?;
    saga.commit();

    debug!(
        organization_id = %instance.organization_id,
        app_instance_id = %instance.app_instance_id,
        "application instance added"
    );
    Ok(instance.to_api())
}

pub async fn get_app_instance(
    state: &CatalogState,
    request: api::AppInstanceId,
) -> OpResult<api::AppInstance> {
    check_instance_scope(state, &request.organization_id, &request.app_instance_id).await?;
    let instance = state
        .applications
        .get_instance(&request.app_instance_id)
        .await?;
    Ok(instance.to_api())
}

pub async fn list_app_instances(
    state: &CatalogState,
    request: api::OrganizationId,
) -> OpResult<Vec<api::AppInstance>> {
    check_organization(state, &request.organization_id).await?;
    let instance_ids = state
        .organizations
        .list_instances(&request.organization_id)
        .await?;
    let mut instances = Vec::with_capacity(instance_ids.len());
    for instance_id in &instance_ids {
        instances.push(state.applications.get_instance(instance_id).await?.to_api());
    }
    Ok(instances)
}

/// Remove an application instance. The instance's endpoints and zero-trust
/// network are denormalized side data; they are purged after the primary
/// removal and a purge failure is logged rather than compensated.
pub async fn remove_app_instance(
    state: &CatalogState,
    request: api::AppInstanceId,
) -> OpResult<api::Success> {
    check_instance_scope(state, &request.organization_id, &request.app_instance_id).await?;

    let mut saga = Saga::new("remove_app_instance");
    state
        .organizations
        .delete_instance(&request.organization_id, &request.app_instance_id)
        .await?;
    {
        let organizations = state.organizations.clone();
        let organization_id = request.organization_id.clone();
        let instance_id = request.app_instance_id.clone();
        saga.push_undo("detach instance from organization", move || async move {
            organizations.add_instance(&organization_id, &instance_id).await
        });
    }
    saga.step(
        state
            .applications
            .remove_instance(&request.app_instance_id)
            .await,
    )
    .await?;
    saga.commit();

    if let Err(err) = state
        .applications
        .remove_endpoints(&request.organization_id, &request.app_instance_id)
        .await
    {
        warn!(
            app_instance_id = %request.app_instance_id,
            error = %err,
            "failed to purge endpoints of removed instance"
        );
    }
    match state
        .applications
        .remove_zt_network(&request.organization_id, &request.app_instance_id)
        .await
    {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            warn!(
                app_instance_id = %request.app_instance_id,
                error = %err,
                "failed to purge zt network of removed instance"
            );
        }
    }

    Ok(api::Success {})
}

pub async fn update_app_status(
    state: &CatalogState,
    request: api::UpdateAppStatusRequest,
) -> OpResult<api::Success> {
    check_instance_scope(state, &request.organization_id, &request.app_instance_id).await?;

    let mut instance = state
        .applications
        .get_instance(&request.app_instance_id)
        .await?;
    instance.status = request.status.into();
    state.applications.update_instance(instance).await?;
    Ok(api::Success {})
}

pub async fn update_service_status(
    state: &CatalogState,
    request: api::UpdateServiceStatusRequest,
) -> OpResult<api::Success> {
    validation::require_field(
        "service_group_instance_id",
        &request.service_group_instance_id,
        &state.limits,
    )?;
    validation::require_field(
        "service_instance_id",
        &request.service_instance_id,
        &state.limits,
    )?;
    check_instance_scope(state, &request.organization_id, &request.app_instance_id).await?;

    let mut instance = state
        .applications
        .get_instance(&request.app_instance_id)
        .await?;
    let group = instance
        .groups
        .iter_mut()
        .find(|group| group.service_group_instance_id == request.service_group_instance_id)
        .ok_or_else(|| {
            CatalogError::not_found(
                "service group instance",
                request.service_group_instance_id.clone(),
            )
        })?;
    let service = group
        .service_instances
        .iter_mut()
        .find(|service| service.service_instance_id == request.service_instance_id)
        .ok_or_else(|| {
            CatalogError::not_found("service instance", request.service_instance_id.clone())
        })?;

    service.status = request.status.into();
    service.endpoints = request.endpoints.clone();
    service.deployed_on_cluster_id = request.deployed_on_cluster_id.clone();
    state.applications.update_instance(instance).await?;
    Ok(api::Success {})
}

/// Materialize service group instances from the instance's descriptor. An
/// empty `service_group_ids` materializes every descriptor group.
pub async fn add_service_group_instances(
    state: &CatalogState,
    request: api::AddServiceGroupInstancesRequest,
) -> OpResult<Vec<api::ServiceGroupInstance>> {
    check_instance_scope(state, &request.organization_id, &request.app_instance_id).await?;

    let mut instance = state
        .applications
        .get_instance(&request.app_instance_id)
        .await?;
    let descriptor = state
        .applications
        .get_descriptor(&instance.app_descriptor_id)
        .await?;

    let selected: Vec<&_> = if request.service_group_ids.is_empty() {
        descriptor.groups.iter().collect()
    } else {
        let mut selected = Vec::with_capacity(request.service_group_ids.len());
        for service_group_id in &request.service_group_ids {
            let group = descriptor
                .groups
                .iter()
                .find(|group| &group.service_group_id == service_group_id)
                .ok_or_else(|| {
                    CatalogError::not_found("service group", service_group_id.clone())
                })?;
            selected.push(group);
        }
        selected
    };

    let materialized: Vec<ServiceGroupInstance> = selected
        .into_iter()
        .map(ServiceGroupInstance::materialize)
        .collect();
    instance.groups.extend(materialized.iter().cloned());
    state.applications.update_instance(instance).await?;

    Ok(materialized
        .iter()
        .map(ServiceGroupInstance::to_api)
        .collect())
}

pub async fn add_app_endpoint(
    state: &CatalogState,
    request: api::AddAppEndpointRequest,
) -> OpResult<api::AppEndpoint> {
    validation::require_field("service_name", &request.service_name, &state.limits)?;
    validation::require_field(
        "service_group_instance_id",
        &request.service_group_instance_id,
        &state.limits,
    )?;
    check_instance_scope(state, &request.organization_id, &request.app_instance_id).await?;

    let endpoint = AppEndpoint::new(&request, &state.endpoints.domain);
    state.applications.add_endpoint(endpoint.clone()).await?;
    Ok(endpoint.to_api())
}

pub async fn get_app_endpoints(
    state: &CatalogState,
    request: api::GetAppEndpointRequest,
) -> OpResult<api::AppEndpointList> {
    validation::require_field("fqdn", &request.fqdn, &state.limits)?;
    let endpoints = state.applications.list_endpoints(&request.fqdn).await?;
    Ok(api::AppEndpointList {
        endpoints: endpoints.iter().map(AppEndpoint::to_api).collect(),
    })
}

pub async fn remove_app_endpoints(
    state: &CatalogState,
    request: api::RemoveAppEndpointsRequest,
) -> OpResult<api::Success> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("app_instance_id", &request.app_instance_id, &state.limits)?;
    check_organization(state, &request.organization_id).await?;
    state
        .applications
        .remove_endpoints(&request.organization_id, &request.app_instance_id)
        .await?;
    Ok(api::Success {})
}

pub async fn add_app_zt_network(
    state: &CatalogState,
    request: api::AddAppZtNetworkRequest,
) -> OpResult<api::Success> {
    validation::require_field("network_id", &request.network_id, &state.limits)?;
    check_instance_scope(state, &request.organization_id, &request.app_instance_id).await?;
    state
        .applications
        .add_zt_network(AppZtNetwork {
            organization_id: request.organization_id,
            app_instance_id: request.app_instance_id,
            network_id: request.network_id,
        })
        .await?;
    Ok(api::Success {})
}

pub async fn remove_app_zt_network(
    state: &CatalogState,
    request: api::RemoveAppZtNetworkRequest,
) -> OpResult<api::Success> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("app_instance_id", &request.app_instance_id, &state.limits)?;
    check_organization(state, &request.organization_id).await?;
    state
        .applications
        .remove_zt_network(&request.organization_id, &request.app_instance_id)
        .await?;
    Ok(api::Success {})
}

async fn check_organization(state: &CatalogState, organization_id: &str) -> OpResult<()> {
    validation::require_field("organization_id", organization_id, &state.limits)?;
    if !state.organizations.exists(organization_id).await? {
        return Err(CatalogError::not_found("organization", organization_id));
    }
    Ok(())
}

async fn check_descriptor_scope(
    state: &CatalogState,
    organization_id: &str,
    descriptor_id: &str,
) -> OpResult<()> {
    check_organization(state, organization_id).await?;
    validation::require_field("app_descriptor_id", descriptor_id, &state.limits)?;
    if !state
        .organizations
        .descriptor_exists(organization_id, descriptor_id)
        .await?
    {
        return Err(CatalogError::not_found("descriptor", descriptor_id));
    }
    Ok(())
}

async fn check_instance_scope(
    state: &CatalogState,
    organization_id: &str,
    instance_id: &str,
) -> OpResult<()> {
    check_organization(state, organization_id).await?;
    validation::require_field("app_instance_id", instance_id, &state.limits)?;
    if !state
        .organizations
        .instance_exists(organization_id, instance_id)
        .await?
    {
        return Err(CatalogError::not_found("instance", instance_id));
    }
    Ok(())
}

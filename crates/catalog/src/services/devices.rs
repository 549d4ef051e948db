use common::api;

use crate::entities::device::{Device, DeviceGroup};
use crate::error::{CatalogError, OpResult};
use crate::provider::device::DeviceProvider;
use crate::provider::organization::OrganizationProvider;
use crate::state::CatalogState;
use crate::validation;

pub async fn add_device_group(
    state: &CatalogState,
    request: api::AddDeviceGroupRequest,
) -> OpResult<api::DeviceGroup> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("device_group_id", &request.device_group_id, &state.limits)?;
    validation::require_field("name", &request.name, &state.limits)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let group = DeviceGroup::new(&request);
    state.devices.add_group(group.clone()).await?;
    Ok(group.to_api())
}

pub async fn get_device_group(
    state: &CatalogState,
    request: api::DeviceGroupId,
) -> OpResult<api::DeviceGroup> {
    check_organization(state, &request.organization_id).await?;
    validation::require_field("device_group_id", &request.device_group_id, &state.limits)?;
    let group = state
        .devices
        .get_group(&request.organization_id, &request.device_group_id)
        .await?;
    Ok(group.to_api())
}

pub async fn list_device_groups(
    state: &CatalogState,
    request: api::OrganizationId,
) -> OpResult<Vec<api::DeviceGroup>> {
    check_organization(state, &request.organization_id).await?;
    let groups = state.devices.list_groups(&request.organization_id).await?;
    Ok(groups.iter().map(DeviceGroup::to_api).collect())
}

/// Remove a device group. Refused while devices remain registered in it.
pub async fn remove_device_group(
    state: &CatalogState,
    request: api::DeviceGroupId,
) -> OpResult<api::Success> {
    check_organization(state, &request.organization_id).await?;
    validation::require_field("device_group_id", &request.device_group_id, &state.limits)?;

    let devices = state
        .devices
        .list_devices(&request.organization_id, &request.device_group_id)
        .await?;
    if !devices.is_empty() {
        return Err(CatalogError::invalid_argument(format!(
            "device group {} still has {} devices",
            request.device_group_id,
            devices.len()
        )));
    }

    state
        .devices
        .remove_group(&request.organization_id, &request.device_group_id)
        .await?;
    Ok(api::Success {})
}

pub async fn add_device(
    state: &CatalogState,
    request: api::AddDeviceRequest,
) -> OpResult<api::Device> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("device_group_id", &request.device_group_id, &state.limits)?;
    validation::require_field("device_id", &request.device_id, &state.limits)?;
    validation::check_labels(&request.labels, &state.limits)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }
    if !state
        .devices
        .group_exists(&request.organization_id, &request.device_group_id)
        .await?
    {
        return Err(CatalogError::not_found(
            "device group",
            request.device_group_id,
        ));
    }

    let device = Device::new(&request);
    state.devices.add_device(device.clone()).await?;
    Ok(device.to_api())
}

pub async fn get_device(state: &CatalogState, request: api::DeviceId) -> OpResult<api::Device> {
    check_organization(state, &request.organization_id).await?;
    validation::require_field("device_group_id", &request.device_group_id, &state.limits)?;
    validation::require_field("device_id", &request.device_id, &state.limits)?;
    let device = state
        .devices
        .get_device(
            &request.organization_id,
            &request.device_group_id,
            &request.device_id,
        )
        .await?;
    Ok(device.to_api())
}

pub async fn list_devices(
    state: &CatalogState,
    request: api::DeviceGroupId,
) -> OpResult<Vec<api::Device>> {
    check_organization(state, &request.organization_id).await?;
    validation::require_field("device_group_id", &request.device_group_id, &state.limits)?;
    if !state
        .devices
        .group_exists(&request.organization_id, &request.device_group_id)
        .await?
    {
        return Err(CatalogError::not_found(
            "device group",
            request.device_group_id,
        ));
    }
    let devices = state
        .devices
        .list_devices(&request.organization_id, &request.device_group_id)
        .await?;
    Ok(devices.iter().map(Device::to_api).collect())
}

pub async fn update_device(
    state: &CatalogState,
    request: api::UpdateDeviceRequest,
) -> OpResult<api::Device> {
    validation::check_labels(&request.labels, &state.limits)?;
    check_organization(state, &request.organization_id).await?;
    validation::require_field("device_group_id", &request.device_group_id, &state.limits)?;
    validation::require_field("device_id", &request.device_id, &state.limits)?;

    let mut device = state
        .devices
        .get_device(
            &request.organization_id,
            &request.device_group_id,
            &request.device_id,
        )
        .await?;
    device.apply_update(&request);
    state.devices.update_device(device.clone()).await?;
    Ok(device.to_api())
}

pub async fn remove_device(
    state: &CatalogState,
    request: api::DeviceId,
) -> OpResult<api::Success> {
    check_organization(state, &request.organization_id).await?;
    validation::require_field("device_group_id", &request.device_group_id, &state.limits)?;
    validation::require_field("device_id", &request.device_id, &state.limits)?;
    state
        .devices
        .remove_device(
            &request.organization_id,
            &request.device_group_id,
            &request.device_id,
        )
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

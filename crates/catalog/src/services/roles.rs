use common::api;

use crate::entities::role::Role;
use crate::error::{CatalogError, OpResult};
use crate::provider::organization::OrganizationProvider;
use crate::provider::role::RoleProvider;
use crate::state::CatalogState;
use crate::validation;

pub async fn add_role(state: &CatalogState, request: api::AddRoleRequest) -> OpResult<api::Role> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("name", &request.name, &state.limits)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let role = Role::new(&request);
    state.roles.add(role.clone()).await?;
    Ok(role.to_api())
}

pub async fn get_role(state: &CatalogState, request: api::RoleId) -> OpResult<api::Role> {
    let role = fetch_scoped_role(state, &request.organization_id, &request.role_id).await?;
    Ok(role.to_api())
}

pub async fn list_roles(
    state: &CatalogState,
    request: api::OrganizationId,
) -> OpResult<Vec<api::Role>> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }
    let roles = state.roles.list(&request.organization_id).await?;
    Ok(roles.iter().map(Role::to_api).collect())
}

pub async fn update_role(
    state: &CatalogState,
    request: api::UpdateRoleRequest,
) -> OpResult<api::Role> {
    if let Some(name) = &request.name {
        validation::require_field("name", name, &state.limits)?;
    }
    let mut role = fetch_scoped_role(state, &request.organization_id, &request.role_id).await?;
    role.apply_update(&request);
    state.roles.update(role.clone()).await?;
    Ok(role.to_api())
}

pub async fn remove_role(state: &CatalogState, request: api::RoleId) -> OpResult<api::Success> {
    let role = fetch_scoped_role(state, &request.organization_id, &request.role_id).await?;
    state.roles.remove(&role.role_id).await?;
    Ok(api::Success {})
}

/// Fetch a role and enforce its organization scope.
async fn fetch_scoped_role(
    state: &CatalogState,
    organization_id: &str,
    role_id: &str,
) -> OpResult<Role> {
    validation::require_field("organization_id", organization_id, &state.limits)?;
    validation::require_field("role_id", role_id, &state.limits)?;
    if !state.organizations.exists(organization_id).await? {
        return Err(CatalogError::not_found("organization", organization_id));
    }
    let role = state.roles.get(role_id).await?;
    if role.organization_id != organization_id {
        return Err(CatalogError::not_found("role", role_id));
    }
    Ok(role)
}

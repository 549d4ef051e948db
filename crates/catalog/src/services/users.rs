use common::api;

use crate::entities::user::User;
use crate::error::{CatalogError, OpResult};
use crate::provider::organization::OrganizationProvider;
use crate::provider::user::UserProvider;
use crate::state::CatalogState;
use crate::validation;

pub async fn add_user(state: &CatalogState, request: api::AddUserRequest) -> OpResult<api::User> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field("email", &request.email, &state.limits)?;
    validation::require_field("name", &request.name, &state.limits)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let user = User::new(&request);
    state.users.add(user.clone()).await?;
    Ok(user.to_api())
}

pub async fn get_user(state: &CatalogState, request: api::UserId) -> OpResult<api::User> {
    check_user_fields(state, &request.organization_id, &request.email).await?;
    let user = state
        .users
        .get(&request.organization_id, &request.email)
        .await?;
    Ok(user.to_api())
}

pub async fn list_users(
    state: &CatalogState,
    request: api::OrganizationId,
) -> OpResult<Vec<api::User>> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }
    let users = state.users.list(&request.organization_id).await?;
    Ok(users.iter().map(User::to_api).collect())
}

pub async fn update_user(
    state: &CatalogState,
    request: api::UpdateUserRequest,
) -> OpResult<api::User> {
    check_user_fields(state, &request.organization_id, &request.email).await?;
    if let Some(name) = &request.name {
        validation::require_field("name", name, &state.limits)?;
    }

    let mut user = state
        .users
        .get(&request.organization_id, &request.email)
        .await?;
    user.apply_update(&request);
    state.users.update(user.clone()).await?;
    Ok(user.to_api())
}

pub async fn remove_user(state: &CatalogState, request: api::UserId) -> OpResult<api::Success> {
    check_user_fields(state, &request.organization_id, &request.email).await?;
    state
        .users
        .remove(&request.organization_id, &request.email)
        .await?;
    Ok(api::Success {})
}

async fn check_user_fields(
    state: &CatalogState,
    organization_id: &str,
    email: &str,
) -> OpResult<()> {
    validation::require_field("organization_id", organization_id, &state.limits)?;
    validation::require_field("email", email, &state.limits)?;
    if !state.organizations.exists(organization_id).await? {
        return Err(CatalogError::not_found("organization", organization_id));
    }
    Ok(())
}

use common::api;
use tracing::debug;

use crate::entities::organization::Organization;
use crate::error::OpResult;
use crate::provider::organization::OrganizationProvider;
use crate::state::CatalogState;
use crate::validation;

pub async fn add_organization(
    state: &CatalogState,
    request: api::AddOrganizationRequest,
) -> OpResult<api::Organization> {
    validation::require_field("name", &request.name, &state.limits)?;
    validation::check_len("email", &request.email, &state.limits)?;
    validation::check_len("full_address", &request.full_address, &state.limits)?;
    validation::check_len("city", &request.city, &state.limits)?;
    validation::check_len("state", &request.state, &state.limits)?;
    validation::check_len("country", &request.country, &state.limits)?;
    validation::check_len("zip_code", &request.zip_code, &state.limits)?;

    let organization = Organization::new(&request);
    state.organizations.add(organization.clone()).await?;
    metrics::counter!("catalog_organizations_created_total").increment(1);
    debug!(organization_id = %organization.organization_id, "organization added");
    Ok(organization.to_api())
}

pub async fn get_organization(
    state: &CatalogState,
    request: api::OrganizationId,
) -> OpResult<api::Organization> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    let organization = state.organizations.get(&request.organization_id).await?;
    Ok(organization.to_api())
}

pub async fn update_organization(
    state: &CatalogState,
    request: api::UpdateOrganizationRequest,
) -> OpResult<api::Organization> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    if let Some(name) = &request.name {
        validation::require_field("name", name, &state.limits)?;
    }

    let mut organization = state.organizations.get(&request.organization_id).await?;
    organization.apply_update(&request);
    state.organizations.update(organization.clone()).await?;
    Ok(organization.to_api())
}

pub async fn list_organizations(state: &CatalogState) -> OpResult<Vec<api::Organization>> {
    let organizations = state.organizations.list().await?;
    Ok(organizations
        .iter()
        .map(Organization::to_api)
        .collect())
}

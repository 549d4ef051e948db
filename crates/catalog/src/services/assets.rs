use common::api;

use crate::entities::asset::Asset;
use crate::error::{CatalogError, OpResult};
use crate::provider::asset::AssetProvider;
use crate::provider::organization::OrganizationProvider;
use crate::state::CatalogState;
use crate::validation;

pub async fn add_asset(state: &CatalogState, request: api::AddAssetRequest) -> OpResult<api::Asset> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    validation::require_field(
        "edge_controller_id",
        &request.edge_controller_id,
        &state.limits,
    )?;
    validation::check_labels(&request.labels, &state.limits)?;

    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let asset = Asset::new(&request);
    state.assets.add(asset.clone()).await?;
    Ok(asset.to_api())
}

pub async fn get_asset(state: &CatalogState, request: api::AssetId) -> OpResult<api::Asset> {
    let asset = fetch_scoped_asset(state, &request.organization_id, &request.asset_id).await?;
    Ok(asset.to_api())
}

pub async fn list_assets(
    state: &CatalogState,
    request: api::ListAssetsRequest,
) -> OpResult<Vec<api::Asset>> {
    validation::require_field("organization_id", &request.organization_id, &state.limits)?;
    if !state.organizations.exists(&request.organization_id).await? {
        return Err(CatalogError::not_found(
            "organization",
            request.organization_id,
        ));
    }

    let assets = state.assets.list(&request.organization_id).await?;
    Ok(assets
        .iter()
        .filter(|asset| match &request.edge_controller_id {
            Some(edge_controller_id) => &asset.edge_controller_id == edge_controller_id,
            None => true,
        })
        .map(Asset::to_api)
        .collect())
}

pub async fn update_asset(
    state: &CatalogState,
    request: api::UpdateAssetRequest,
) -> OpResult<api::Asset> {
    validation::check_labels(&request.labels, &state.limits)?;
    let mut asset = fetch_scoped_asset(state, &request.organization_id, &request.asset_id).await?;
    asset.apply_update(&request);
    state.assets.update(asset.clone()).await?;
    Ok(asset.to_api())
}

pub async fn remove_asset(state: &CatalogState, request: api::AssetId) -> OpResult<api::Success> {
    let asset = fetch_scoped_asset(state, &request.organization_id, &request.asset_id).await?;
    state.assets.remove(&asset.asset_id).await?;
    Ok(api::Success {})
}

/// Fetch an asset and enforce its organization scope: an asset id that exists
/// under a different organization is reported as absent, not leaked.
async fn fetch_scoped_asset(
    state: &CatalogState,
    organization_id: &str,
    asset_id: &str,
) -> OpResult<Asset> {
    validation::require_field("organization_id", organization_id, &state.limits)?;
    validation::require_field("asset_id", asset_id, &state.limits)?;
    if !state.organizations.exists(organization_id).await? {
        return Err(CatalogError::not_found("organization", organization_id));
    }
    let asset = state.assets.get(asset_id).await?;
    if asset.organization_id != organization_id {
        return Err(CatalogError::not_found("asset", asset_id));
    }
    Ok(asset)
}

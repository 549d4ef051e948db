use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::entities::asset::Asset;
use crate::error::{CatalogError, OpResult};

/// Record store for assets, listable by owning organization.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    async fn add(&self, asset: Asset) -> OpResult<()>;
    async fn exists(&self, asset_id: &str) -> OpResult<bool>;
    async fn get(&self, asset_id: &str) -> OpResult<Asset>;
    async fn update(&self, asset: Asset) -> OpResult<()>;
    async fn remove(&self, asset_id: &str) -> OpResult<()>;
    /// Assets of one organization in registration order.
    async fn list(&self, organization_id: &str) -> OpResult<Vec<Asset>>;
}

pub type DynAssetProvider = Arc<dyn AssetProvider>;

/// In-memory asset store.
pub struct InMemoryAssetProvider {
    assets: DashMap<String, Asset>,
    by_organization: DashMap<String, Vec<String>>,
}

impl InMemoryAssetProvider {
    pub fn new() -> Self {
        Self {
            assets: DashMap::new(),
            by_organization: DashMap::new(),
        }
    }
}

impl Default for InMemoryAssetProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetProvider for InMemoryAssetProvider {
    async fn add(&self, asset: Asset) -> OpResult<()> {
        let id = asset.asset_id.clone();
        if self.assets.contains_key(&id) {
            return Err(CatalogError::already_exists("asset", id));
        }
        self.by_organization
            .entry(asset.organization_id.clone())
            .or_default()
            .push(id.clone());
        self.assets.insert(id, asset);
        Ok(())
    }

    async fn exists(&self, asset_id: &str) -> OpResult<bool> {
        Ok(self.assets.contains_key(asset_id))
    }

    async fn get(&self, asset_id: &str) -> OpResult<Asset> {
        self.assets
            .get(asset_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| CatalogError::not_found("asset", asset_id))
    }

    async fn update(&self, asset: Asset) -> OpResult<()> {
        let mut entry = self
            .assets
            .get_mut(&asset.asset_id)
            .ok_or_else(|| CatalogError::not_found("asset", asset.asset_id.clone()))?;
        *entry = asset;
        Ok(())
    }

    async fn remove(&self, asset_id: &str) -> OpResult<()> {
        let Some((_, asset)) = self.assets.remove(asset_id) else {
            return Err(CatalogError::not_found("asset", asset_id));
        };
        if let Some(mut ids) = self.by_organization.get_mut(&asset.organization_id) {
            ids.retain(|id| id != asset_id);
        }
        Ok(())
    }

    async fn list(&self, organization_id: &str) -> OpResult<Vec<Asset>> {
        let Some(ids) = self.by_organization.get(organization_id) else {
            return Ok(Vec::new());
        };
        let mut assets = Vec::with_capacity(ids.len());
        for id in ids.iter() {
            if let Some(asset) = self.assets.get(id) {
                assets.push(asset.clone());
            }
        }
        Ok(assets)
    }
}

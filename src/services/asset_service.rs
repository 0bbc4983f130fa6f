use serde::Deserialize;

use crate::db::repositories::AssetRepository;
use crate::entity::assets::{ActiveModel, Model as Asset};
use crate::error::{MarketError, MarketResult};

/// Asset categories the storefront knows how to render
const ASSET_TYPES: [&str; 3] = ["equipment", "property", "business"];

/// Admin payload for creating an asset
#[derive(Debug, Deserialize)]
pub struct AssetInput {
    pub name_es: String,
    pub name_en: String,
    pub asset_type: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub projected_return_bps: i32,
    pub token_price_cents: i64,
    pub total_supply: i64,
    pub operator_id: Option<i32>,
    pub contract_address: Option<String>,
}

/// Admin payload for partially updating an asset
#[derive(Debug, Default, Deserialize)]
pub struct AssetPatch {
    pub name_es: Option<String>,
    pub name_en: Option<String>,
    pub asset_type: Option<String>,
    pub image_url: Option<String>,
    pub projected_return_bps: Option<i32>,
    pub token_price_cents: Option<i64>,
    pub total_supply: Option<i64>,
    pub operator_id: Option<i32>,
    pub contract_address: Option<String>,
}

/// Service for asset-related business logic
pub struct AssetService {
    assets: AssetRepository,
}

impl AssetService {
    /// Create a new asset service instance
    pub fn new(assets: AssetRepository) -> Self {
        Self { assets }
    }

    /// Get assets with pagination and optional filtering
    pub async fn get_assets_paginated(
        &self,
        asset_type: Option<&str>,
        operator_id: Option<i32>,
        limit: u64,
        offset: u64,
    ) -> MarketResult<(Vec<Asset>, u64)> {
        let assets = self
            .assets
            .find_paginated(asset_type, operator_id, limit, offset)
            .await?;

        let total = self.assets.count_assets(asset_type, operator_id).await?;

        Ok((assets, total))
    }

    /// Get a single asset or fail with not-found
    pub async fn get_asset(&self, id: i32) -> MarketResult<Asset> {
        self.assets
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::NotFound(format!("asset {} not found", id)))
    }

    /// Create a new asset from admin input
    pub async fn create_asset(&self, input: AssetInput) -> MarketResult<Asset> {
        if input.name_es.trim().is_empty() || input.name_en.trim().is_empty() {
            return Err(MarketError::InvalidRequest(
                "both locale names are required".to_string(),
            ));
        }
        if !ASSET_TYPES.contains(&input.asset_type.as_str()) {
            return Err(MarketError::InvalidRequest(format!(
                "unknown asset type: {}",
                input.asset_type
            )));
        }
        if input.token_price_cents <= 0 {
            return Err(MarketError::InvalidRequest(
                "token price must be positive".to_string(),
            ));
        }
        if input.total_supply <= 0 {
            return Err(MarketError::InvalidRequest(
                "total supply must be positive".to_string(),
            ));
        }

        use sea_orm::ActiveValue::Set;
        let now = chrono::Utc::now();
        let asset = self
            .assets
            .insert(ActiveModel {
                name_es: Set(input.name_es.trim().to_string()),
                name_en: Set(input.name_en.trim().to_string()),
                asset_type: Set(input.asset_type),
                image_url: Set(input.image_url),
                projected_return_bps: Set(input.projected_return_bps),
                token_price_cents: Set(input.token_price_cents),
                total_supply: Set(input.total_supply),
                tokens_sold: Set(0),
                operator_id: Set(input.operator_id),
                contract_address: Set(input.contract_address),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .await?;

        tracing::info!(asset_id = asset.id, "asset created");
        Ok(asset)
    }

    /// Apply a partial update. The supply can never be shrunk below what
    /// has already been sold.
    pub async fn update_asset(&self, id: i32, patch: AssetPatch) -> MarketResult<Asset> {
        let current = self.get_asset(id).await?;

        if let Some(asset_type) = patch.asset_type.as_deref() {
            if !ASSET_TYPES.contains(&asset_type) {
                return Err(MarketError::InvalidRequest(format!(
                    "unknown asset type: {}",
                    asset_type
                )));
            }
        }
        if let Some(price) = patch.token_price_cents {
            if price <= 0 {
                return Err(MarketError::InvalidRequest(
                    "token price must be positive".to_string(),
                ));
            }
        }
        if let Some(supply) = patch.total_supply {
            if supply < current.tokens_sold {
                return Err(MarketError::Conflict(format!(
                    "{} tokens already sold, supply cannot drop below that",
                    current.tokens_sold
                )));
            }
        }

        use sea_orm::ActiveValue::Set;
        let mut changes: ActiveModel = current.into();
        if let Some(v) = patch.name_es {
            changes.name_es = Set(v);
        }
        if let Some(v) = patch.name_en {
            changes.name_en = Set(v);
        }
        if let Some(v) = patch.asset_type {
            changes.asset_type = Set(v);
        }
        if let Some(v) = patch.image_url {
            changes.image_url = Set(Some(v));
        }
        if let Some(v) = patch.projected_return_bps {
            changes.projected_return_bps = Set(v);
        }
        if let Some(v) = patch.token_price_cents {
            changes.token_price_cents = Set(v);
        }
        if let Some(v) = patch.total_supply {
            changes.total_supply = Set(v);
        }
        if let Some(v) = patch.operator_id {
            changes.operator_id = Set(Some(v));
        }
        if let Some(v) = patch.contract_address {
            changes.contract_address = Set(Some(v));
        }
        changes.updated_at = Set(chrono::Utc::now());

        let asset = self.assets.update(changes).await?;
        Ok(asset)
    }

    /// Remove an asset from the catalogue
    pub async fn delete_asset(&self, id: i32) -> MarketResult<()> {
        let removed = self.assets.delete_by_id(id).await?;
        if removed == 0 {
            return Err(MarketError::NotFound(format!("asset {} not found", id)));
        }
        tracing::info!(asset_id = id, "asset deleted");
        Ok(())
    }
}

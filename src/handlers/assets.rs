// Storefront and admin asset endpoint handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entity::assets;
use crate::error::MarketResult;
use crate::handlers::{AdminUser, AppState, AuthUser};
use crate::models::{bps_to_percent, cents_to_eur, percent_sold, PaginationInfo, PaginationParams};
use crate::services::asset_service::{AssetInput, AssetPatch, AssetService};
use crate::services::sale_service::{self, SaleReceipt};
use crate::services::resolve_wallet;

#[derive(Debug, Deserialize)]
pub struct AssetQueryParams {
    pub asset_type: Option<String>,
    pub operator_id: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Asset as rendered by the storefront, with the derived sale figures
#[derive(Debug, Serialize)]
pub struct AssetItem {
    pub id: i32,
    pub name_es: String,
    pub name_en: String,
    pub asset_type: String,
    pub image_url: Option<String>,
    pub projected_return: Decimal,
    pub token_price: Decimal,
    pub total_supply: i64,
    pub tokens_sold: i64,
    pub tokens_available: i64,
    pub percent_sold: Decimal,
    pub operator_id: Option<i32>,
    pub contract_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub(crate) fn to_item(asset: assets::Model) -> AssetItem {
    AssetItem {
        id: asset.id,
        tokens_available: asset.tokens_available(),
        percent_sold: percent_sold(asset.tokens_sold, asset.total_supply),
        projected_return: bps_to_percent(asset.projected_return_bps),
        token_price: cents_to_eur(asset.token_price_cents),
        name_es: asset.name_es,
        name_en: asset.name_en,
        asset_type: asset.asset_type,
        image_url: asset.image_url,
        total_supply: asset.total_supply,
        tokens_sold: asset.tokens_sold,
        operator_id: asset.operator_id,
        contract_address: asset.contract_address,
        created_at: asset.created_at,
        updated_at: asset.updated_at,
    }
}

#[derive(Debug, Serialize)]
pub struct AssetsResponse {
    pub assets: Vec<AssetItem>,
    pub pagination: PaginationInfo,
}

/// Handler for GET /assets - paginated catalogue with optional filters
pub async fn list_assets(
    Query(params): Query<AssetQueryParams>,
    State(state): State<AppState>,
) -> MarketResult<Json<AssetsResponse>> {
    let service = AssetService::new(state.repositories.assets.clone());

    let pagination = PaginationParams {
        page: params.page,
        limit: params.limit,
    };
    let page = pagination.page();
    let limit = pagination.limit();

    let (assets, total) = service
        .get_assets_paginated(
            params.asset_type.as_deref(),
            params.operator_id,
            limit,
            pagination.offset(),
        )
        .await?;

    Ok(Json(AssetsResponse {
        assets: assets.into_iter().map(to_item).collect(),
        pagination: PaginationInfo::new(page, limit, total),
    }))
}

/// Operator summary embedded in the asset detail
#[derive(Debug, Serialize)]
pub struct OperatorSummary {
    pub id: i32,
    pub name_es: String,
    pub name_en: String,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssetDetailResponse {
    #[serde(flatten)]
    pub asset: AssetItem,
    pub operator: Option<OperatorSummary>,
}

/// Handler for GET /assets/{id} - detail view with linked operator
pub async fn get_asset(
    Path(asset_id): Path<i32>,
    State(state): State<AppState>,
) -> MarketResult<Json<AssetDetailResponse>> {
    let service = AssetService::new(state.repositories.assets.clone());
    let asset = service.get_asset(asset_id).await?;

    let operator = match asset.operator_id {
        Some(operator_id) => state
            .repositories
            .operators
            .get_by_id(operator_id)
            .await?
            .map(|o| OperatorSummary {
                id: o.id,
                name_es: o.name_es,
                name_en: o.name_en,
                location: o.location,
            }),
        None => None,
    };

    Ok(Json(AssetDetailResponse {
        asset: to_item(asset),
        operator,
    }))
}

/// Handler for POST /assets - admin asset creation
pub async fn create_asset(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<AssetInput>,
) -> MarketResult<Json<AssetItem>> {
    let service = AssetService::new(state.repositories.assets.clone());
    let asset = service.create_asset(input).await?;
    Ok(Json(to_item(asset)))
}

/// Handler for PUT /assets/{id} - admin asset update
pub async fn update_asset(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(asset_id): Path<i32>,
    Json(patch): Json<AssetPatch>,
) -> MarketResult<Json<AssetItem>> {
    let service = AssetService::new(state.repositories.assets.clone());
    let asset = service.update_asset(asset_id, patch).await?;
    Ok(Json(to_item(asset)))
}

/// Handler for DELETE /assets/{id} - admin asset removal
pub async fn delete_asset(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(asset_id): Path<i32>,
) -> MarketResult<Json<serde_json::Value>> {
    let service = AssetService::new(state.repositories.assets.clone());
    service.delete_asset(asset_id).await?;
    Ok(Json(json!({ "status": "deleted" })))
}

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub quantity: i64,
    pub wallet_address: Option<String>,
}

/// Handler for POST /assets/{id}/purchase - primary market buy
pub async fn purchase_asset(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(asset_id): Path<i32>,
    Json(body): Json<PurchaseRequest>,
) -> MarketResult<Json<SaleReceipt>> {
    let wallet = resolve_wallet(&user, body.wallet_address)?;
    let receipt = sale_service::purchase_tokens(&state, asset_id, &wallet, body.quantity).await?;
    Ok(Json(receipt))
}

// Marketplace board endpoint handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entity::listings;
use crate::error::MarketResult;
use crate::handlers::{AppState, AuthUser};
use crate::models::cents_to_eur;
use crate::services::marketplace_service::{self, BatchReceipt};
use crate::services::resolve_wallet;

#[derive(Debug, Serialize)]
pub struct ListingItem {
    pub id: i32,
    pub asset_id: i32,
    pub seller_wallet: String,
    pub quantity: i64,
    pub price_per_token: Decimal,
    pub total: Decimal,
    pub status: String,
    pub buyer_wallet: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn to_item(listing: listings::Model) -> ListingItem {
    ListingItem {
        id: listing.id,
        price_per_token: cents_to_eur(listing.price_per_token_cents),
        total: cents_to_eur(listing.total_cents()),
        asset_id: listing.asset_id,
        seller_wallet: listing.seller_wallet,
        quantity: listing.quantity,
        status: listing.status,
        buyer_wallet: listing.buyer_wallet,
        created_at: listing.created_at,
    }
}

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub total: usize,
    pub listings: Vec<ListingItem>,
}

fn to_response(listings: Vec<listings::Model>) -> ListingsResponse {
    let listings: Vec<ListingItem> = listings.into_iter().map(to_item).collect();
    ListingsResponse {
        total: listings.len(),
        listings,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListingQueryParams {
    pub asset_id: Option<i32>,
}

/// Handler for GET /marketplace/listings - active board, cheapest first
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingQueryParams>,
) -> MarketResult<Json<ListingsResponse>> {
    let listings = state
        .repositories
        .listings
        .find_active(params.asset_id)
        .await?;
    Ok(Json(to_response(listings)))
}

/// Handler for GET /marketplace/listings/mine - caller's listings, any status
pub async fn my_listings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> MarketResult<Json<ListingsResponse>> {
    let wallet = resolve_wallet(&user, None)?;
    let listings = state
        .repositories
        .listings
        .find_by_seller(&wallet, None)
        .await?;
    Ok(Json(to_response(listings)))
}

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub asset_id: i32,
    pub quantity: i64,
    pub price_per_token_cents: i64,
    pub wallet_address: Option<String>,
}

/// Handler for POST /marketplace/listings - put tokens up for resale
pub async fn create_listing(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<CreateListingRequest>,
) -> MarketResult<Json<ListingItem>> {
    let listing = marketplace_service::create_listing(
        &state,
        &user,
        body.asset_id,
        body.quantity,
        body.price_per_token_cents,
        body.wallet_address,
    )
    .await?;

    Ok(Json(to_item(listing)))
}

/// Handler for DELETE /marketplace/listings/{id} - seller withdrawal
pub async fn cancel_listing(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(listing_id): Path<i32>,
) -> MarketResult<Json<serde_json::Value>> {
    marketplace_service::cancel_listing(&state, &user, listing_id).await?;
    Ok(Json(json!({ "status": "cancelled" })))
}

#[derive(Debug, Deserialize)]
pub struct BatchPurchaseRequest {
    pub listing_ids: Vec<i32>,
    pub wallet_address: Option<String>,
}

/// Handler for POST /marketplace/purchase - multi-select batch buy
pub async fn purchase_listings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<BatchPurchaseRequest>,
) -> MarketResult<Json<BatchReceipt>> {
    let receipt = marketplace_service::purchase_listings(
        &state,
        &user,
        &body.listing_ids,
        body.wallet_address,
    )
    .await?;

    Ok(Json(receipt))
}

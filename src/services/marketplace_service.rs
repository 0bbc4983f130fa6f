// Marketplace listing board: peer-to-peer resale of asset tokens
//
// Listings are escrow-free, so the board enforces two balance rules the
// storefront relies on: a seller can never have more tokens listed than
// held, and a batch purchase settles seller and buyer holdings inside one
// transaction.

use rust_decimal::Decimal;
use sea_orm::{ActiveValue::Set, EntityTrait, TransactionTrait};
use serde::Serialize;

use crate::db::repositories::{credit_holding, debit_holding_guarded, mark_listing_sold};
use crate::entity::{assets, listings, users};
use crate::error::{MarketError, MarketResult};
use crate::handlers::AppState;
use crate::models::cents_to_eur;
use crate::services::resolve_wallet;

/// Puts a quantity of the seller's tokens on the board at an asking price.
pub async fn create_listing(
    state: &AppState,
    user: &users::Model,
    asset_id: i32,
    quantity: i64,
    price_per_token_cents: i64,
    wallet: Option<String>,
) -> MarketResult<listings::Model> {
    if quantity <= 0 {
        return Err(MarketError::InvalidRequest(
            "quantity must be positive".to_string(),
        ));
    }
    if price_per_token_cents <= 0 {
        return Err(MarketError::InvalidRequest(
            "price per token must be positive".to_string(),
        ));
    }

    let seller = resolve_wallet(user, wallet)?;

    if state
        .repositories
        .assets
        .get_by_id(asset_id)
        .await?
        .is_none()
    {
        return Err(MarketError::NotFound(format!(
            "asset {} not found",
            asset_id
        )));
    }

    // Balance rule: the new listing plus everything already on the board
    // must fit inside the wallet's recorded holding.
    let held = state
        .repositories
        .holdings
        .find_by_wallet_and_asset(&seller, asset_id)
        .await?
        .map(|h| h.quantity)
        .unwrap_or(0);
    let already_listed = state
        .repositories
        .listings
        .active_quantity_for_seller(&seller, asset_id)
        .await?;

    if held < already_listed + quantity {
        return Err(MarketError::Conflict(format!(
            "wallet holds {} tokens, {} already listed",
            held, already_listed
        )));
    }

    let now = chrono::Utc::now();
    let listing = state
        .repositories
        .listings
        .insert(listings::ActiveModel {
            asset_id: Set(asset_id),
            seller_wallet: Set(seller),
            quantity: Set(quantity),
            price_per_token_cents: Set(price_per_token_cents),
            status: Set(listings::STATUS_ACTIVE.to_string()),
            buyer_wallet: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .await?;

    tracing::info!(listing_id = listing.id, asset_id, quantity, "listing created");
    Ok(listing)
}

/// Withdraws the caller's own active listing from the board.
pub async fn cancel_listing(
    state: &AppState,
    user: &users::Model,
    listing_id: i32,
) -> MarketResult<()> {
    let seller = resolve_wallet(user, None)?;

    let cancelled = state
        .repositories
        .listings
        .cancel_active(listing_id, &seller)
        .await?;

    if !cancelled {
        return Err(MarketError::NotFound(format!(
            "no active listing {} for this wallet",
            listing_id
        )));
    }

    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BatchLine {
    pub listing_id: i32,
    pub asset_id: i32,
    pub seller_wallet: String,
    pub quantity: i64,
    pub price_per_token: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BatchReceipt {
    pub buyer_wallet: String,
    pub lines: Vec<BatchLine>,
    pub total: Decimal,
}

/// Buys a multi-selected batch of listings in one transaction.
///
/// Every line must succeed: a listing gone inactive, or a seller whose
/// holding no longer covers the listed quantity, fails the whole batch and
/// the dropped transaction rolls back the lines already settled.
pub async fn purchase_listings(
    state: &AppState,
    user: &users::Model,
    listing_ids: &[i32],
    wallet: Option<String>,
) -> MarketResult<BatchReceipt> {
    if listing_ids.is_empty() {
        return Err(MarketError::InvalidRequest(
            "no listings selected".to_string(),
        ));
    }

    let buyer = resolve_wallet(user, wallet)?;

    let mut ids: Vec<i32> = listing_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    let txn = state.db.begin().await?;
    let mut lines = Vec::with_capacity(ids.len());
    let mut total_cents: i64 = 0;

    for listing_id in ids {
        let listing = listings::Entity::find_by_id(listing_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                MarketError::NotFound(format!("listing {} not found", listing_id))
            })?;

        if listing.seller_wallet == buyer {
            return Err(MarketError::InvalidRequest(format!(
                "listing {} belongs to the buying wallet",
                listing_id
            )));
        }

        if !mark_listing_sold(&txn, listing_id, &buyer).await? {
            return Err(MarketError::Conflict(format!(
                "listing {} is no longer available",
                listing_id
            )));
        }

        if !debit_holding_guarded(&txn, &listing.seller_wallet, listing.asset_id, listing.quantity)
            .await?
        {
            return Err(MarketError::Conflict(format!(
                "seller of listing {} no longer holds the listed tokens",
                listing_id
            )));
        }

        let contract_address = assets::Entity::find_by_id(listing.asset_id)
            .one(&txn)
            .await?
            .and_then(|a| a.contract_address);

        credit_holding(
            &txn,
            &buyer,
            listing.asset_id,
            contract_address.as_deref(),
            listing.quantity,
        )
        .await?;

        total_cents += listing.total_cents();
        let line_total = cents_to_eur(listing.total_cents());
        lines.push(BatchLine {
            listing_id,
            asset_id: listing.asset_id,
            seller_wallet: listing.seller_wallet,
            quantity: listing.quantity,
            price_per_token: cents_to_eur(listing.price_per_token_cents),
            line_total,
        });
    }

    txn.commit().await?;

    tracing::info!(
        buyer = buyer.as_str(),
        listings = lines.len(),
        total_cents,
        "marketplace batch purchase settled"
    );

    Ok(BatchReceipt {
        buyer_wallet: buyer,
        lines,
        total: cents_to_eur(total_cents),
    })
}

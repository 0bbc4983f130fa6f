// Primary-market token sale accounting
//
// The sold counter moves through a single guarded UPDATE so concurrent
// purchases cannot overwrite each other; holdings accumulate through an
// atomic upsert in the same transaction.

use rust_decimal::Decimal;
use sea_orm::TransactionTrait;
use serde::Serialize;

use crate::db::repositories::{credit_holding, reserve_tokens};
use crate::entity::assets;
use crate::error::{MarketError, MarketResult};
use crate::handlers::AppState;
use crate::models::{cents_to_eur, percent_sold};

/// Pushed to every subscribed storefront tab after a successful purchase
#[derive(Debug, Clone, Serialize)]
pub struct AssetSaleUpdate {
    pub asset_id: i32,
    pub tokens_sold: i64,
    pub total_supply: i64,
    pub tokens_available: i64,
    pub percent_sold: Decimal,
}

impl AssetSaleUpdate {
    pub fn from_asset(asset: &assets::Model) -> Self {
        Self {
            asset_id: asset.id,
            tokens_sold: asset.tokens_sold,
            total_supply: asset.total_supply,
            tokens_available: asset.tokens_available(),
            percent_sold: percent_sold(asset.tokens_sold, asset.total_supply),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaleReceipt {
    pub asset_id: i32,
    pub wallet_address: String,
    pub quantity: i64,
    pub token_price: Decimal,
    pub total_price: Decimal,
    pub tokens_sold: i64,
    pub tokens_available: i64,
    pub percent_sold: Decimal,
}

/// Buys `quantity` tokens of an asset for a wallet.
pub async fn purchase_tokens(
    state: &AppState,
    asset_id: i32,
    wallet: &str,
    quantity: i64,
) -> MarketResult<SaleReceipt> {
    if quantity <= 0 {
        return Err(MarketError::InvalidRequest(
            "quantity must be positive".to_string(),
        ));
    }

    let asset = state
        .repositories
        .assets
        .get_by_id(asset_id)
        .await?
        .ok_or_else(|| MarketError::NotFound(format!("asset {} not found", asset_id)))?;

    let txn = state.db.begin().await?;

    // An uncommitted transaction rolls back on drop, so early returns
    // below leave no partial state behind.
    if !reserve_tokens(&txn, asset_id, quantity, asset.total_supply).await? {
        return Err(MarketError::Conflict(format!(
            "only {} tokens available",
            asset.tokens_available()
        )));
    }

    credit_holding(
        &txn,
        wallet,
        asset_id,
        asset.contract_address.as_deref(),
        quantity,
    )
    .await?;

    txn.commit().await?;

    let refreshed = state
        .repositories
        .assets
        .get_by_id(asset_id)
        .await?
        .ok_or_else(|| MarketError::InternalError("asset vanished mid-purchase".to_string()))?;

    let update = AssetSaleUpdate::from_asset(&refreshed);
    // A send error only means no storefront tab is listening right now
    let _ = state.sale_events.send(update);

    tracing::info!(asset_id, quantity, wallet, "primary market purchase recorded");

    Ok(SaleReceipt {
        asset_id,
        wallet_address: wallet.to_string(),
        quantity,
        token_price: cents_to_eur(refreshed.token_price_cents),
        total_price: cents_to_eur(refreshed.token_price_cents * quantity),
        tokens_sold: refreshed.tokens_sold,
        tokens_available: refreshed.tokens_available(),
        percent_sold: percent_sold(refreshed.tokens_sold, refreshed.total_supply),
    })
}

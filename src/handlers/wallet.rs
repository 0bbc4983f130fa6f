// Wallet endpoint handlers - read-only chain data for display

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{MarketError, MarketResult};
use crate::handlers::AppState;
use crate::services::wallet_service::{TokenBalance, WalletService};

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub contract: String,
    #[serde(default = "default_network")]
    pub network: String,
}

fn default_network() -> String {
    "polygon".to_string()
}

/// GET /wallet/balance/{address}?contract=0x..&network=polygon|bsc
///
/// Proxies an ERC-20 balance overview from the public RPC endpoint for the
/// requested network. Upstream calls are bounded by the shared semaphore so
/// a storefront refresh storm cannot pile onto the free endpoints.
pub async fn get_token_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(params): Query<BalanceQuery>,
) -> MarketResult<Json<TokenBalance>> {
    let _permit = state
        .rpc_semaphore
        .acquire()
        .await
        .map_err(|e| MarketError::InternalError(format!("Semaphore error: {}", e)))?;

    let rpc_url = state.config.rpc_url(&params.network);

    match WalletService::get_token_balance(
        &state.http_client,
        rpc_url,
        &params.network,
        &params.contract,
        &address,
    )
    .await
    {
        Ok(balance) => Ok(Json(balance)),
        Err(e) => {
            tracing::error!("Wallet: failed to get balance for {}: {}", address, e);
            Err(MarketError::UpstreamError(e))
        }
    }
}

// Smart-contract record endpoint handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entity::contracts;
use crate::error::{MarketError, MarketResult};
use crate::handlers::{AdminUser, AppState};
use crate::services::contract_service::{self, ContractInput, ContractPatch};

#[derive(Debug, Serialize)]
pub struct ContractsResponse {
    pub total: usize,
    pub contracts: Vec<contracts::Model>,
}

#[derive(Debug, Deserialize)]
pub struct ContractQueryParams {
    pub owner: Option<String>,
}

/// Handler for GET /contracts - all records, optionally filtered by owner
pub async fn list_contracts(
    State(state): State<AppState>,
    Query(params): Query<ContractQueryParams>,
) -> MarketResult<Json<ContractsResponse>> {
    let contracts = match params.owner.as_deref() {
        Some(owner) => state.repositories.contracts.find_by_owner(owner).await?,
        None => state.repositories.contracts.find_all().await?,
    };

    Ok(Json(ContractsResponse {
        total: contracts.len(),
        contracts,
    }))
}

/// Handler for GET /contracts/{address}
pub async fn get_contract(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> MarketResult<Json<contracts::Model>> {
    let contract = state
        .repositories
        .contracts
        .get_by_address(&address)
        .await?
        .ok_or_else(|| MarketError::NotFound(format!("contract {} not found", address)))?;

    Ok(Json(contract))
}

/// Handler for POST /contracts - admin record creation with generated address
pub async fn create_contract(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<ContractInput>,
) -> MarketResult<Json<contracts::Model>> {
    let record = contract_service::create_record(&state, input).await?;
    Ok(Json(record))
}

/// Handler for PUT /contracts/{address} - admin record update
pub async fn update_contract(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(address): Path<String>,
    Json(patch): Json<ContractPatch>,
) -> MarketResult<Json<contracts::Model>> {
    let record = contract_service::update_record(&state, &address, patch).await?;
    Ok(Json(record))
}

/// Handler for DELETE /contracts/{address} - admin record removal
pub async fn delete_contract(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(address): Path<String>,
) -> MarketResult<Json<serde_json::Value>> {
    contract_service::delete_record(&state, &address).await?;
    Ok(Json(json!({ "status": "deleted" })))
}

// Income claim endpoint handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::entity::claims;
use crate::error::MarketResult;
use crate::handlers::{AdminUser, AppState, AuthUser};
use crate::services::claim_service;
use crate::services::resolve_wallet;

#[derive(Debug, Serialize)]
pub struct ClaimsResponse {
    pub total: usize,
    pub claims: Vec<claims::Model>,
}

#[derive(Debug, Deserialize)]
pub struct CreateClaimRequest {
    pub asset_id: i32,
    pub amount_cents: i64,
    pub wallet_address: Option<String>,
}

/// Handler for POST /claims - file a claim for the caller's wallet
pub async fn create_claim(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<CreateClaimRequest>,
) -> MarketResult<Json<claims::Model>> {
    let claim = claim_service::file_claim(
        &state,
        &user,
        body.asset_id,
        body.amount_cents,
        body.wallet_address,
    )
    .await?;

    Ok(Json(claim))
}

/// Handler for GET /claims/mine - the caller's own claims
pub async fn my_claims(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> MarketResult<Json<ClaimsResponse>> {
    let wallet = resolve_wallet(&user, None)?;
    let claims = state.repositories.claims.find_by_wallet(&wallet).await?;

    Ok(Json(ClaimsResponse {
        total: claims.len(),
        claims,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ClaimQueryParams {
    pub status: Option<String>,
}

/// Handler for GET /claims - admin review queue
pub async fn list_claims(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(params): Query<ClaimQueryParams>,
) -> MarketResult<Json<ClaimsResponse>> {
    let claims = state
        .repositories
        .claims
        .find_all(params.status.as_deref())
        .await?;

    Ok(Json(ClaimsResponse {
        total: claims.len(),
        claims,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ClaimStatusRequest {
    pub status: String,
    pub notes: Option<String>,
}

/// Handler for PUT /claims/{id}/status - admin lifecycle transition
pub async fn update_claim_status(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(claim_id): Path<i32>,
    Json(body): Json<ClaimStatusRequest>,
) -> MarketResult<Json<claims::Model>> {
    let claim = claim_service::set_status(&state, claim_id, &body.status, body.notes).await?;
    Ok(Json(claim))
}

// Income distribution claims: filed by holders, resolved by admins

use sea_orm::ActiveValue::Set;

use crate::entity::claims::{self, transition_allowed, STATUS_APPROVED, STATUS_PAID, STATUS_PENDING, STATUS_REJECTED};
use crate::entity::users;
use crate::error::{MarketError, MarketResult};
use crate::handlers::AppState;
use crate::services::resolve_wallet;

/// Files a new claim against an asset for the caller's wallet.
pub async fn file_claim(
    state: &AppState,
    user: &users::Model,
    asset_id: i32,
    amount_cents: i64,
    wallet: Option<String>,
) -> MarketResult<claims::Model> {
    if amount_cents <= 0 {
        return Err(MarketError::InvalidRequest(
            "claim amount must be positive".to_string(),
        ));
    }

    let wallet = resolve_wallet(user, wallet)?;

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

    let now = chrono::Utc::now();
    let claim = state
        .repositories
        .claims
        .insert(claims::ActiveModel {
            wallet_address: Set(wallet),
            asset_id: Set(asset_id),
            amount_cents: Set(amount_cents),
            status: Set(STATUS_PENDING.to_string()),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .await?;

    tracing::info!(claim_id = claim.id, asset_id, amount_cents, "claim filed");
    Ok(claim)
}

/// Moves a claim along its lifecycle. Illegal transitions are conflicts.
pub async fn set_status(
    state: &AppState,
    claim_id: i32,
    new_status: &str,
    notes: Option<String>,
) -> MarketResult<claims::Model> {
    if ![STATUS_APPROVED, STATUS_PAID, STATUS_REJECTED].contains(&new_status) {
        return Err(MarketError::InvalidRequest(format!(
            "unknown claim status: {}",
            new_status
        )));
    }

    let claim = state
        .repositories
        .claims
        .get_by_id(claim_id)
        .await?
        .ok_or_else(|| MarketError::NotFound(format!("claim {} not found", claim_id)))?;

    if !transition_allowed(&claim.status, new_status) {
        return Err(MarketError::Conflict(format!(
            "claim is {}, cannot become {}",
            claim.status, new_status
        )));
    }

    let mut changes: claims::ActiveModel = claim.into();
    changes.status = Set(new_status.to_string());
    if let Some(notes) = notes {
        changes.notes = Set(Some(notes));
    }
    changes.updated_at = Set(chrono::Utc::now());

    let updated = state.repositories.claims.update(changes).await?;
    tracing::info!(claim_id, status = new_status, "claim status changed");
    Ok(updated)
}

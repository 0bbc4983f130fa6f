// Smart-contract record management
//
// Records describe a token's nominal on-chain identity. Addresses are
// generated here and never verified against a deployed contract.

use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use uuid::Uuid;

use crate::entity::contracts;
use crate::error::{MarketError, MarketResult};
use crate::handlers::AppState;

/// Admin payload for creating a contract record
#[derive(Debug, Deserialize)]
pub struct ContractInput {
    pub name: String,
    pub symbol: String,
    pub total_supply: i64,
    pub owner_wallet: String,
    #[serde(default)]
    pub documents: Vec<DocumentLink>,
}

/// Admin payload for partially updating a contract record
#[derive(Debug, Default, Deserialize)]
pub struct ContractPatch {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub total_supply: Option<i64>,
    pub owner_wallet: Option<String>,
    pub documents: Option<Vec<DocumentLink>>,
}

/// IPFS-style document link stored in the record's JSON column
#[derive(Debug, Deserialize, serde::Serialize)]
pub struct DocumentLink {
    pub name: String,
    pub uri: String,
}

/// Creates a contract record with a freshly generated address.
pub async fn create_record(
    state: &AppState,
    input: ContractInput,
) -> MarketResult<contracts::Model> {
    if input.name.trim().is_empty() || input.symbol.trim().is_empty() {
        return Err(MarketError::InvalidRequest(
            "name and symbol are required".to_string(),
        ));
    }
    if input.total_supply <= 0 {
        return Err(MarketError::InvalidRequest(
            "total supply must be positive".to_string(),
        ));
    }
    if input.owner_wallet.trim().is_empty() {
        return Err(MarketError::InvalidRequest(
            "owner wallet is required".to_string(),
        ));
    }

    let now = chrono::Utc::now();
    let record = state
        .repositories
        .contracts
        .insert(contracts::ActiveModel {
            contract_address: Set(generate_contract_address()),
            name: Set(input.name.trim().to_string()),
            symbol: Set(input.symbol.trim().to_uppercase()),
            total_supply: Set(input.total_supply),
            owner_wallet: Set(input.owner_wallet.trim().to_string()),
            documents: Set(serde_json::to_value(&input.documents)
                .map_err(|e| MarketError::InternalError(e.to_string()))?),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .await?;

    tracing::info!(address = record.contract_address.as_str(), "contract record created");
    Ok(record)
}

/// Applies a partial update to a contract record.
pub async fn update_record(
    state: &AppState,
    address: &str,
    patch: ContractPatch,
) -> MarketResult<contracts::Model> {
    let current = state
        .repositories
        .contracts
        .get_by_address(address)
        .await?
        .ok_or_else(|| MarketError::NotFound(format!("contract {} not found", address)))?;

    if let Some(supply) = patch.total_supply {
        if supply <= 0 {
            return Err(MarketError::InvalidRequest(
                "total supply must be positive".to_string(),
            ));
        }
    }

    let mut changes: contracts::ActiveModel = current.into();
    if let Some(v) = patch.name {
        changes.name = Set(v);
    }
    if let Some(v) = patch.symbol {
        changes.symbol = Set(v.to_uppercase());
    }
    if let Some(v) = patch.total_supply {
        changes.total_supply = Set(v);
    }
    if let Some(v) = patch.owner_wallet {
        changes.owner_wallet = Set(v);
    }
    if let Some(v) = patch.documents {
        changes.documents =
            Set(serde_json::to_value(&v).map_err(|e| MarketError::InternalError(e.to_string()))?);
    }
    changes.updated_at = Set(chrono::Utc::now());

    let record = state.repositories.contracts.update(changes).await?;
    Ok(record)
}

/// Removes a contract record.
pub async fn delete_record(state: &AppState, address: &str) -> MarketResult<()> {
    let removed = state
        .repositories
        .contracts
        .delete_by_address(address)
        .await?;
    if removed == 0 {
        return Err(MarketError::NotFound(format!(
            "contract {} not found",
            address
        )));
    }
    Ok(())
}

/// Generates a 20-byte hex address with the usual `0x` prefix. Collisions
/// are ruled out by the primary key, not by this function.
pub fn generate_contract_address() -> String {
    let a = Uuid::new_v4().simple().to_string();
    let b = Uuid::new_v4().simple().to_string();
    format!("0x{}{}", a, &b[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_addresses_look_like_evm_addresses() {
        let address = generate_contract_address();
        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 42);
        assert!(address[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_addresses_differ() {
        assert_ne!(generate_contract_address(), generate_contract_address());
    }
}

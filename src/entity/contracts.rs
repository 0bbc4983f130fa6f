//! SeaORM Entity for smart-contract records
//!
//! A row describes a token's nominal on-chain identity. Addresses are
//! generated by this service, not verified against any deployed contract.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub contract_address: String,
    pub name: String,
    pub symbol: String,
    pub total_supply: i64,
    pub owner_wallet: String,
    /// Array of `{name, uri}` document links (IPFS-style, unverified)
    pub documents: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

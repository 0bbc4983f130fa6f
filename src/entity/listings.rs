//! SeaORM Entity for the marketplace listings table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Listing lifecycle states. A listing leaves `active` exactly once.
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_SOLD: &str = "sold";
pub const STATUS_CANCELLED: &str = "cancelled";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub asset_id: i32,
    pub seller_wallet: String,
    pub quantity: i64,
    pub price_per_token_cents: i64,
    pub status: String,
    #[sea_orm(nullable)]
    pub buyer_wallet: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Model {
    /// Asking total for the whole listing
    pub fn total_cents(&self) -> i64 {
        self.quantity * self.price_per_token_cents
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

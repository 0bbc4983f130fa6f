use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name_es: String,
    pub name_en: String,
    pub asset_type: String,
    pub image_url: Option<String>,
    /// Projected annual return in basis points (825 = 8.25%)
    pub projected_return_bps: i32,
    pub token_price_cents: i64,
    pub total_supply: i64,
    pub tokens_sold: i64,
    pub operator_id: Option<i32>,
    pub contract_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Model {
    /// Unsold tokens, floored at zero
    pub fn tokens_available(&self) -> i64 {
        (self.total_supply - self.tokens_sold).max(0)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

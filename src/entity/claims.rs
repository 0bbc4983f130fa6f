//! SeaORM Entity for income distribution claims

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_PAID: &str = "paid";
pub const STATUS_REJECTED: &str = "rejected";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "claims")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub wallet_address: String,
    pub asset_id: i32,
    pub amount_cents: i64,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Legal claim status transitions: pending can be approved or rejected,
/// approved can be paid. Everything else is terminal.
pub fn transition_allowed(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (STATUS_PENDING, STATUS_APPROVED)
            | (STATUS_PENDING, STATUS_REJECTED)
            | (STATUS_APPROVED, STATUS_PAID)
    )
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_claims_can_be_resolved() {
        assert!(transition_allowed(STATUS_PENDING, STATUS_APPROVED));
        assert!(transition_allowed(STATUS_PENDING, STATUS_REJECTED));
        assert!(transition_allowed(STATUS_APPROVED, STATUS_PAID));
    }

    #[test]
    fn terminal_states_stay_terminal() {
        assert!(!transition_allowed(STATUS_PAID, STATUS_PENDING));
        assert!(!transition_allowed(STATUS_REJECTED, STATUS_APPROVED));
        assert!(!transition_allowed(STATUS_PENDING, STATUS_PAID));
        assert!(!transition_allowed(STATUS_APPROVED, STATUS_REJECTED));
    }
}

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::db::DbError;
use crate::entity::contracts::{ActiveModel, Column, Entity as Contracts, Model};

/// Repository for smart-contract record operations
#[derive(Clone)]
pub struct ContractRepository {
    conn: DatabaseConnection,
}

impl ContractRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get all contract records, newest first
    pub async fn find_all(&self) -> Result<Vec<Model>, DbError> {
        let contracts = Contracts::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(contracts)
    }

    /// Find a contract record by address
    pub async fn get_by_address(&self, address: &str) -> Result<Option<Model>, DbError> {
        let contract = Contracts::find_by_id(address.to_string())
            .one(&self.conn)
            .await?;
        Ok(contract)
    }

    /// Find contract records by owner wallet
    pub async fn find_by_owner(&self, owner: &str) -> Result<Vec<Model>, DbError> {
        let contracts = Contracts::find()
            .filter(Column::OwnerWallet.eq(owner))
            .order_by_desc(Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(contracts)
    }

    /// Insert a new contract record
    pub async fn insert(&self, model: ActiveModel) -> Result<Model, DbError> {
        let contract = model.insert(&self.conn).await?;
        Ok(contract)
    }

    /// Apply an update to an existing contract record
    pub async fn update(&self, model: ActiveModel) -> Result<Model, DbError> {
        let contract = model.update(&self.conn).await?;
        Ok(contract)
    }

    /// Delete a contract record, returning the number of rows removed
    pub async fn delete_by_address(&self, address: &str) -> Result<u64, DbError> {
        let res = Contracts::delete_by_id(address.to_string())
            .exec(&self.conn)
            .await?;
        Ok(res.rows_affected)
    }
}

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::db::DbError;
use crate::entity::claims::{ActiveModel, Column, Entity as Claims, Model};

/// Repository for income claim operations
#[derive(Clone)]
pub struct ClaimRepository {
    conn: DatabaseConnection,
}

impl ClaimRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All claims, newest first, optionally filtered by status
    pub async fn find_all(&self, status: Option<&str>) -> Result<Vec<Model>, DbError> {
        let mut query = Claims::find();

        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }

        let claims = query
            .order_by_desc(Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(claims)
    }

    /// Claims filed by a wallet, newest first
    pub async fn find_by_wallet(&self, wallet: &str) -> Result<Vec<Model>, DbError> {
        let claims = Claims::find()
            .filter(Column::WalletAddress.eq(wallet))
            .order_by_desc(Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(claims)
    }

    /// Find claim by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Model>, DbError> {
        let claim = Claims::find_by_id(id).one(&self.conn).await?;
        Ok(claim)
    }

    /// Insert a new claim
    pub async fn insert(&self, model: ActiveModel) -> Result<Model, DbError> {
        let claim = model.insert(&self.conn).await?;
        Ok(claim)
    }

    /// Apply an update to an existing claim
    pub async fn update(&self, model: ActiveModel) -> Result<Model, DbError> {
        let claim = model.update(&self.conn).await?;
        Ok(claim)
    }
}

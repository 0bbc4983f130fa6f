use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::db::DbError;
use crate::entity::assets::{ActiveModel, Column, Entity as Assets, Model};

/// Repository for asset database operations
#[derive(Clone)]
pub struct AssetRepository {
    conn: DatabaseConnection,
}

impl AssetRepository {
    /// Create a new asset repository instance
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Find assets with pagination and optional filtering
    pub async fn find_paginated(
        &self,
        asset_type: Option<&str>,
        operator_id: Option<i32>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Model>, DbError> {
        let mut query = Assets::find();

        if let Some(asset_type) = asset_type {
            query = query.filter(Column::AssetType.eq(asset_type));
        }

        if let Some(operator_id) = operator_id {
            query = query.filter(Column::OperatorId.eq(operator_id));
        }

        let assets = query
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await?;

        Ok(assets)
    }

    /// Count assets with optional filtering
    pub async fn count_assets(
        &self,
        asset_type: Option<&str>,
        operator_id: Option<i32>,
    ) -> Result<u64, DbError> {
        let mut query = Assets::find();

        if let Some(asset_type) = asset_type {
            query = query.filter(Column::AssetType.eq(asset_type));
        }

        if let Some(operator_id) = operator_id {
            query = query.filter(Column::OperatorId.eq(operator_id));
        }

        let count = query.count(&self.conn).await?;
        Ok(count)
    }

    /// Find asset by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Model>, DbError> {
        let asset = Assets::find_by_id(id).one(&self.conn).await?;
        Ok(asset)
    }

    /// Insert a new asset
    pub async fn insert(&self, model: ActiveModel) -> Result<Model, DbError> {
        let asset = model.insert(&self.conn).await?;
        Ok(asset)
    }

    /// Apply an update to an existing asset
    pub async fn update(&self, model: ActiveModel) -> Result<Model, DbError> {
        let asset = model.update(&self.conn).await?;
        Ok(asset)
    }

    /// Delete an asset by ID, returning the number of rows removed
    pub async fn delete_by_id(&self, id: i32) -> Result<u64, DbError> {
        let res = Assets::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected)
    }
}

/// Guarded atomic increment of `tokens_sold`.
///
/// The supply check lives in the WHERE clause of a single UPDATE, so two
/// concurrent purchases can never both succeed past the remaining supply.
/// Returns false when the guard rejects the increment (sold out, or another
/// buyer got there first).
pub async fn reserve_tokens<C: ConnectionTrait>(
    conn: &C,
    asset_id: i32,
    quantity: i64,
    total_supply: i64,
) -> Result<bool, DbError> {
    let res = Assets::update_many()
        .col_expr(
            Column::TokensSold,
            Expr::col(Column::TokensSold).add(quantity),
        )
        .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(Column::Id.eq(asset_id))
        .filter(Column::TokensSold.lte(total_supply - quantity))
        .exec(conn)
        .await?;

    Ok(res.rows_affected > 0)
}

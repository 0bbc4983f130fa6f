// Repository for marketplace listing queries

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::db::DbError;
use crate::entity::listings::{self, Column, Entity as Listings, Model, STATUS_ACTIVE, STATUS_SOLD};

#[derive(Clone)]
pub struct ListingRepository {
    conn: DatabaseConnection,
}

impl ListingRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get all active listings, cheapest first, optionally filtered by asset
    pub async fn find_active(&self, asset_id: Option<i32>) -> Result<Vec<Model>, DbError> {
        let mut query = Listings::find().filter(Column::Status.eq(STATUS_ACTIVE));

        if let Some(asset_id) = asset_id {
            query = query.filter(Column::AssetId.eq(asset_id));
        }

        let results = query
            .order_by_asc(Column::PricePerTokenCents)
            .order_by_asc(Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(results)
    }

    /// Get listing by ID
    pub async fn get_by_id(&self, listing_id: i32) -> Result<Option<Model>, DbError> {
        let result = Listings::find_by_id(listing_id).one(&self.conn).await?;
        Ok(result)
    }

    /// Find listings by seller wallet, optionally filtered by status
    pub async fn find_by_seller(
        &self,
        seller: &str,
        status: Option<&str>,
    ) -> Result<Vec<Model>, DbError> {
        let mut query = Listings::find().filter(Column::SellerWallet.eq(seller));

        if let Some(s) = status {
            query = query.filter(Column::Status.eq(s));
        }

        let results = query
            .order_by_desc(Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(results)
    }

    /// Total quantity the seller already has on the board for an asset
    pub async fn active_quantity_for_seller(
        &self,
        seller: &str,
        asset_id: i32,
    ) -> Result<i64, DbError> {
        let listings = Listings::find()
            .filter(Column::SellerWallet.eq(seller))
            .filter(Column::AssetId.eq(asset_id))
            .filter(Column::Status.eq(STATUS_ACTIVE))
            .all(&self.conn)
            .await?;

        Ok(listings.iter().map(|l| l.quantity).sum())
    }

    /// Insert a new listing
    pub async fn insert(&self, model: listings::ActiveModel) -> Result<Model, DbError> {
        let listing = model.insert(&self.conn).await?;
        Ok(listing)
    }

    /// Cancel the seller's own active listing. Returns false when the
    /// listing is missing, already closed, or owned by someone else.
    pub async fn cancel_active(&self, listing_id: i32, seller: &str) -> Result<bool, DbError> {
        let res = Listings::update_many()
            .col_expr(
                Column::Status,
                Expr::value(listings::STATUS_CANCELLED),
            )
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(Column::Id.eq(listing_id))
            .filter(Column::SellerWallet.eq(seller))
            .filter(Column::Status.eq(STATUS_ACTIVE))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected > 0)
    }
}

/// Flips a listing from active to sold, recording the buyer.
///
/// The status predicate makes the transition single-shot: a listing that was
/// already sold (or cancelled) affects zero rows and the caller treats that
/// as a conflict.
pub async fn mark_listing_sold<C: ConnectionTrait>(
    conn: &C,
    listing_id: i32,
    buyer_wallet: &str,
) -> Result<bool, DbError> {
    let res = Listings::update_many()
        .col_expr(Column::Status, Expr::value(STATUS_SOLD))
        .col_expr(Column::BuyerWallet, Expr::value(buyer_wallet))
        .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(Column::Id.eq(listing_id))
        .filter(Column::Status.eq(STATUS_ACTIVE))
        .exec(conn)
        .await?;

    Ok(res.rows_affected > 0)
}

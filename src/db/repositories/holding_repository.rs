use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::db::DbError;
use crate::entity::holdings::{self, Column, Entity as Holdings, Model};

/// Repository for holding queries
#[derive(Clone)]
pub struct HoldingRepository {
    conn: DatabaseConnection,
}

impl HoldingRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All holdings for a wallet, newest first
    pub async fn find_by_wallet(&self, wallet: &str) -> Result<Vec<Model>, DbError> {
        let holdings = Holdings::find()
            .filter(Column::WalletAddress.eq(wallet))
            .order_by_desc(Column::UpdatedAt)
            .all(&self.conn)
            .await?;
        Ok(holdings)
    }

    /// The holding row for a wallet/asset pair, if any
    pub async fn find_by_wallet_and_asset(
        &self,
        wallet: &str,
        asset_id: i32,
    ) -> Result<Option<Model>, DbError> {
        let holding = Holdings::find()
            .filter(Column::WalletAddress.eq(wallet))
            .filter(Column::AssetId.eq(asset_id))
            .one(&self.conn)
            .await?;
        Ok(holding)
    }

    /// All holdings recorded against an asset
    pub async fn find_by_asset(&self, asset_id: i32) -> Result<Vec<Model>, DbError> {
        let holdings = Holdings::find()
            .filter(Column::AssetId.eq(asset_id))
            .order_by_desc(Column::Quantity)
            .all(&self.conn)
            .await?;
        Ok(holdings)
    }
}

/// Adds `quantity` tokens to the wallet's holding for an asset.
///
/// The common path bumps the existing row in place with a relative UPDATE,
/// so concurrent purchases accumulate instead of overwriting each other.
/// The first purchase for a pair inserts the row; losing that insert race
/// to another first purchase falls back to the relative UPDATE.
pub async fn credit_holding<C: ConnectionTrait>(
    conn: &C,
    wallet: &str,
    asset_id: i32,
    contract_address: Option<&str>,
    quantity: i64,
) -> Result<(), DbError> {
    if increment_quantity(conn, wallet, asset_id, quantity).await? {
        return Ok(());
    }

    let now = chrono::Utc::now();
    let row = holdings::ActiveModel {
        wallet_address: Set(wallet.to_string()),
        asset_id: Set(asset_id),
        contract_address: Set(contract_address.map(|s| s.to_string())),
        quantity: Set(quantity),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = Holdings::insert(row)
        .on_conflict(
            OnConflict::columns([Column::WalletAddress, Column::AssetId])
                .do_nothing()
                .to_owned(),
        )
        .exec(conn)
        .await;

    match result {
        Ok(_) => Ok(()),
        // A concurrent first purchase inserted the row between our two
        // statements; the relative UPDATE now has a row to land on
        Err(sea_orm::DbErr::RecordNotInserted) => {
            increment_quantity(conn, wallet, asset_id, quantity).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Relative quantity bump; false when no row exists for the pair yet
async fn increment_quantity<C: ConnectionTrait>(
    conn: &C,
    wallet: &str,
    asset_id: i32,
    quantity: i64,
) -> Result<bool, DbError> {
    let res = Holdings::update_many()
        .col_expr(Column::Quantity, Expr::col(Column::Quantity).add(quantity))
        .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(Column::WalletAddress.eq(wallet))
        .filter(Column::AssetId.eq(asset_id))
        .exec(conn)
        .await?;

    Ok(res.rows_affected > 0)
}

/// Removes `quantity` tokens from the wallet's holding for an asset.
///
/// The balance check is part of the UPDATE's WHERE clause; returns false
/// when the wallet does not hold enough tokens.
pub async fn debit_holding_guarded<C: ConnectionTrait>(
    conn: &C,
    wallet: &str,
    asset_id: i32,
    quantity: i64,
) -> Result<bool, DbError> {
    let res = Holdings::update_many()
        .col_expr(Column::Quantity, Expr::col(Column::Quantity).sub(quantity))
        .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(Column::WalletAddress.eq(wallet))
        .filter(Column::AssetId.eq(asset_id))
        .filter(Column::Quantity.gte(quantity))
        .exec(conn)
        .await?;

    Ok(res.rows_affected > 0)
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create claims table for income distribution requests
        manager
            .create_table(
                Table::create()
                    .table(Claims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Claims::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Claims::WalletAddress).string().not_null())
                    .col(ColumnDef::new(Claims::AssetId).integer().not_null())
                    .col(ColumnDef::new(Claims::AmountCents).big_integer().not_null())
                    .col(
                        ColumnDef::new(Claims::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Claims::Notes).text())
                    .col(
                        ColumnDef::new(Claims::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Claims::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on wallet_address
        manager
            .create_index(
                Index::create()
                    .name("idx_claims_wallet_address")
                    .table(Claims::Table)
                    .col(Claims::WalletAddress)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create index on status for admin review queries
        manager
            .create_index(
                Index::create()
                    .name("idx_claims_status")
                    .table(Claims::Table)
                    .col(Claims::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Claims::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Claims {
    Table,
    Id,
    WalletAddress,
    AssetId,
    AmountCents,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

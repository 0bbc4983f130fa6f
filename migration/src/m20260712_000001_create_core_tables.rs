use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create operators table
        manager
            .create_table(
                Table::create()
                    .table(Operators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Operators::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Operators::NameEs).string().not_null())
                    .col(ColumnDef::new(Operators::NameEn).string().not_null())
                    .col(ColumnDef::new(Operators::ContactEmail).string().not_null())
                    .col(ColumnDef::new(Operators::ContactPhone).string())
                    .col(ColumnDef::new(Operators::ProfileImageUrl).string())
                    .col(ColumnDef::new(Operators::Location).string())
                    .col(
                        ColumnDef::new(Operators::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Operators::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create assets table
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assets::NameEs).string().not_null())
                    .col(ColumnDef::new(Assets::NameEn).string().not_null())
                    .col(ColumnDef::new(Assets::AssetType).string().not_null())
                    .col(ColumnDef::new(Assets::ImageUrl).string())
                    .col(
                        ColumnDef::new(Assets::ProjectedReturnBps)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Assets::TokenPriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assets::TotalSupply).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assets::TokensSold)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Assets::OperatorId).integer())
                    .col(ColumnDef::new(Assets::ContractAddress).string())
                    .col(
                        ColumnDef::new(Assets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Assets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on asset_type
        manager
            .create_index(
                Index::create()
                    .name("idx_assets_asset_type")
                    .table(Assets::Table)
                    .col(Assets::AssetType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create index on operator_id
        manager
            .create_index(
                Index::create()
                    .name("idx_assets_operator_id")
                    .table(Assets::Table)
                    .col(Assets::OperatorId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create holdings table
        manager
            .create_table(
                Table::create()
                    .table(Holdings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Holdings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Holdings::WalletAddress).string().not_null())
                    .col(ColumnDef::new(Holdings::AssetId).integer().not_null())
                    .col(ColumnDef::new(Holdings::ContractAddress).string())
                    .col(
                        ColumnDef::new(Holdings::Quantity)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Holdings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Holdings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One holding row per wallet/asset pair
        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("idx_holdings_wallet_asset_unique")
                    .table(Holdings::Table)
                    .col(Holdings::WalletAddress)
                    .col(Holdings::AssetId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create listings table
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Listings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Listings::AssetId).integer().not_null())
                    .col(ColumnDef::new(Listings::SellerWallet).string().not_null())
                    .col(ColumnDef::new(Listings::Quantity).big_integer().not_null())
                    .col(
                        ColumnDef::new(Listings::PricePerTokenCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Listings::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Listings::BuyerWallet).string())
                    .col(
                        ColumnDef::new(Listings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Listings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on asset_id + status for the board query
        manager
            .create_index(
                Index::create()
                    .name("idx_listings_asset_status")
                    .table(Listings::Table)
                    .col(Listings::AssetId)
                    .col(Listings::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create index on seller_wallet
        manager
            .create_index(
                Index::create()
                    .name("idx_listings_seller_wallet")
                    .table(Listings::Table)
                    .col(Listings::SellerWallet)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create ratings table
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ratings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ratings::OperatorId).integer().not_null())
                    .col(ColumnDef::new(Ratings::UserId).integer().not_null())
                    .col(ColumnDef::new(Ratings::Rating).small_integer().not_null())
                    .col(ColumnDef::new(Ratings::Comment).text())
                    .col(
                        ColumnDef::new(Ratings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Ratings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One rating per user/operator pair
        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("idx_ratings_operator_user_unique")
                    .table(Ratings::Table)
                    .col(Ratings::OperatorId)
                    .col(Ratings::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create contracts table
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::ContractAddress)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::Name).string().not_null())
                    .col(ColumnDef::new(Contracts::Symbol).string().not_null())
                    .col(
                        ColumnDef::new(Contracts::TotalSupply)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::OwnerWallet).string().not_null())
                    .col(
                        ColumnDef::new(Contracts::Documents)
                            .json()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Contracts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_owner_wallet")
                    .table(Contracts::Table)
                    .col(Contracts::OwnerWallet)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Holdings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Operators::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Operators {
    Table,
    Id,
    NameEs,
    NameEn,
    ContactEmail,
    ContactPhone,
    ProfileImageUrl,
    Location,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
    NameEs,
    NameEn,
    AssetType,
    ImageUrl,
    ProjectedReturnBps,
    TokenPriceCents,
    TotalSupply,
    TokensSold,
    OperatorId,
    ContractAddress,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Holdings {
    Table,
    Id,
    WalletAddress,
    AssetId,
    ContractAddress,
    Quantity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Listings {
    Table,
    Id,
    AssetId,
    SellerWallet,
    Quantity,
    PricePerTokenCents,
    Status,
    BuyerWallet,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    OperatorId,
    UserId,
    Rating,
    Comment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    ContractAddress,
    Name,
    Symbol,
    TotalSupply,
    OwnerWallet,
    Documents,
    CreatedAt,
    UpdatedAt,
}

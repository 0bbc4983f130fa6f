// Database repository management

mod asset_repository;
mod claim_repository;
mod contract_repository;
mod holding_repository;
mod listing_repository;
mod operator_repository;
mod rating_repository;
mod user_repository;

pub use asset_repository::{reserve_tokens, AssetRepository};
pub use claim_repository::ClaimRepository;
pub use contract_repository::ContractRepository;
pub use holding_repository::{credit_holding, debit_holding_guarded, HoldingRepository};
pub use listing_repository::{mark_listing_sold, ListingRepository};
pub use operator_repository::OperatorRepository;
pub use rating_repository::RatingRepository;
pub use user_repository::UserRepository;

use sea_orm::DatabaseConnection;

/// Container for all database repositories
pub struct Repositories {
    pub assets: AssetRepository,
    pub operators: OperatorRepository,
    pub holdings: HoldingRepository,
    pub listings: ListingRepository,
    pub ratings: RatingRepository,
    pub contracts: ContractRepository,
    pub users: UserRepository,
    pub claims: ClaimRepository,
}

impl Repositories {
    /// Creates a new repositories container with database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        Repositories {
            assets: AssetRepository::new(conn.clone()),
            operators: OperatorRepository::new(conn.clone()),
            holdings: HoldingRepository::new(conn.clone()),
            listings: ListingRepository::new(conn.clone()),
            ratings: RatingRepository::new(conn.clone()),
            contracts: ContractRepository::new(conn.clone()),
            users: UserRepository::new(conn.clone()),
            claims: ClaimRepository::new(conn),
        }
    }
}

pub use sea_orm_migration::prelude::*;

mod m20260712_000001_create_core_tables;
mod m20260718_000001_create_users_and_sessions;
mod m20260725_000001_create_claims_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260712_000001_create_core_tables::Migration),
            Box::new(m20260718_000001_create_users_and_sessions::Migration),
            Box::new(m20260725_000001_create_claims_table::Migration),
        ]
    }
}

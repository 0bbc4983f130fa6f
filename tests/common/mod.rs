use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tempfile::NamedTempFile;

use tangible_market_api::config::ApiConfig;
use tangible_market_api::entity::{assets, operators, users};
use tangible_market_api::handlers::{ApiState, AppState};
use tangible_market_api::services::asset_service::{AssetInput, AssetService};
use tangible_market_api::services::auth_service;

/// Test database with automatic cleanup
pub struct TestDb {
    connection: DatabaseConnection,
    _temp_file: NamedTempFile,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        // Create temporary SQLite database file
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_str().expect("Invalid temp file path");
        let db_url = format!("sqlite://{}?mode=rwc", db_path);

        // Connect to database
        let connection = Database::connect(&db_url)
            .await
            .expect("Failed to connect to test database");

        // Run migrations
        Migrator::up(&connection, None)
            .await
            .expect("Failed to run migrations");

        Self {
            connection,
            _temp_file: temp_file,
        }
    }

    /// Get database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Build the shared application state over this database
    pub fn state(&self) -> AppState {
        Arc::new(ApiState::new(ApiConfig::from_env(), self.connection.clone()))
    }
}

/// Register a user and give them a wallet address
pub async fn seed_user(state: &AppState, name: &str, email: &str, wallet: &str) -> users::Model {
    auth_service::register(
        state,
        name,
        email,
        "password123",
        Some(wallet.to_string()),
    )
    .await
    .expect("Failed to create test user")
}

/// Register a user and promote them to admin
pub async fn seed_admin(state: &AppState) -> users::Model {
    let user = auth_service::register(state, "Admin", "admin@example.com", "password123", None)
        .await
        .expect("Failed to create admin user");

    auth_service::set_role(state, user.id, users::ROLE_ADMIN)
        .await
        .expect("Failed to promote admin user")
}

/// Create a test asset with the given price and supply
pub async fn seed_asset(
    state: &AppState,
    name: &str,
    token_price_cents: i64,
    total_supply: i64,
) -> assets::Model {
    let service = AssetService::new(state.repositories.assets.clone());
    service
        .create_asset(AssetInput {
            name_es: format!("{} (ES)", name),
            name_en: name.to_string(),
            asset_type: "property".to_string(),
            image_url: None,
            projected_return_bps: 850,
            token_price_cents,
            total_supply,
            operator_id: None,
            contract_address: Some("0x00000000000000000000000000000000000000aa".to_string()),
        })
        .await
        .expect("Failed to create test asset")
}

/// Create a test operator
pub async fn seed_operator(state: &AppState) -> operators::Model {
    use sea_orm::ActiveValue::Set;

    let now = chrono::Utc::now();
    state
        .repositories
        .operators
        .insert(operators::ActiveModel {
            name_es: Set("Operadora del Sur".to_string()),
            name_en: Set("Southern Operator".to_string()),
            contact_email: Set("ops@example.com".to_string()),
            contact_phone: Set(None),
            profile_image_url: Set(None),
            location: Set(Some("Sevilla".to_string())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .await
        .expect("Failed to create test operator")
}

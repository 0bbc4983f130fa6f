// Mundo Tangible API server entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post, put};
use axum::Router;
use http::{header, Method};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tangible_market_api::config::ApiConfig;
use tangible_market_api::db::DbPool;
use tangible_market_api::handlers::{self, ApiState};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Configure logging with tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load API configuration from environment
    let config = ApiConfig::from_env();
    tracing::info!("Configuration loaded");

    // Establish database connection pool
    let db_pool = DbPool::new(&config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database");

    let state = Arc::new(ApiState::new(
        config.clone(),
        db_pool.get_connection().clone(),
    ));

    // Configure CORS policy for the storefront frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::AUTHORIZATION,
        ])
        .max_age(Duration::from_secs(3600));

    // Set up API routes
    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        // Accounts and sessions
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/me/wallet", put(handlers::auth::update_wallet))
        .route("/users", get(handlers::users::list_users))
        .route("/users/{id}/role", put(handlers::users::update_role))
        // Asset catalogue and primary market
        .route(
            "/assets",
            get(handlers::assets::list_assets).post(handlers::assets::create_asset),
        )
        .route(
            "/assets/{id}",
            get(handlers::assets::get_asset)
                .put(handlers::assets::update_asset)
                .delete(handlers::assets::delete_asset),
        )
        .route(
            "/assets/{id}/purchase",
            post(handlers::assets::purchase_asset),
        )
        // Marketplace board
        .route(
            "/marketplace/listings",
            get(handlers::marketplace::list_listings).post(handlers::marketplace::create_listing),
        )
        .route(
            "/marketplace/listings/mine",
            get(handlers::marketplace::my_listings),
        )
        .route(
            "/marketplace/listings/{id}",
            delete(handlers::marketplace::cancel_listing),
        )
        .route(
            "/marketplace/purchase",
            post(handlers::marketplace::purchase_listings),
        )
        // Operator directory and ratings
        .route(
            "/operators",
            get(handlers::operators::list_operators).post(handlers::operators::create_operator),
        )
        .route(
            "/operators/{id}",
            get(handlers::operators::get_operator)
                .put(handlers::operators::update_operator)
                .delete(handlers::operators::delete_operator),
        )
        .route(
            "/operators/{id}/ratings",
            get(handlers::operators::get_operator_ratings),
        )
        .route(
            "/operators/{id}/rating",
            put(handlers::operators::rate_operator),
        )
        // Smart-contract records
        .route(
            "/contracts",
            get(handlers::contracts::list_contracts).post(handlers::contracts::create_contract),
        )
        .route(
            "/contracts/{address}",
            get(handlers::contracts::get_contract)
                .put(handlers::contracts::update_contract)
                .delete(handlers::contracts::delete_contract),
        )
        // Income claims
        .route(
            "/claims",
            get(handlers::claims::list_claims).post(handlers::claims::create_claim),
        )
        .route("/claims/mine", get(handlers::claims::my_claims))
        .route(
            "/claims/{id}/status",
            put(handlers::claims::update_claim_status),
        )
        // Chain reads and live sale updates
        .route(
            "/wallet/balance/{address}",
            get(handlers::wallet::get_token_balance),
        )
        .route("/events/assets", get(handlers::events::asset_events))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(GlobalConcurrencyLimitLayer::new(1024))
        .with_state(state);

    // Parse server address from config
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");

    // Start HTTP server
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

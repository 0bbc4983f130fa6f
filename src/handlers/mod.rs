// Handlers Module
// This module contains the API endpoint handlers and the shared state

pub mod assets;
pub mod auth;
pub mod claims;
pub mod contracts;
pub mod events;
pub mod health;
pub mod marketplace;
pub mod operators;
pub mod users;
pub mod wallet;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::{broadcast, Semaphore};

use crate::config::ApiConfig;
use crate::db::Repositories;
use crate::entity::users::{self as user_entity, ROLE_ADMIN};
use crate::error::MarketError;
use crate::services::auth_service;
use crate::services::sale_service::AssetSaleUpdate;

/// Shared application state handed to every handler
pub struct ApiState {
    pub config: ApiConfig,
    pub db: DatabaseConnection,
    pub repositories: Repositories,
    pub http_client: reqwest::Client,
    pub rpc_semaphore: Semaphore,
    pub sale_events: broadcast::Sender<AssetSaleUpdate>,
}

impl ApiState {
    pub fn new(config: ApiConfig, db: DatabaseConnection) -> Self {
        // Subscribers that fall 256 updates behind observe a lagged skip
        let (sale_events, _) = broadcast::channel(256);

        ApiState {
            repositories: Repositories::new(db.clone()),
            db,
            config,
            http_client: reqwest::Client::new(),
            rpc_semaphore: Semaphore::new(8),
            sale_events,
        }
    }
}

// Type alias for the application state
pub type AppState = Arc<ApiState>;

/// Pulls the bearer session token out of the authorization header
pub(crate) fn bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, MarketError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| MarketError::Unauthorized("missing authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| MarketError::Unauthorized("expected a bearer token".to_string()))
}

/// Authenticated user, resolved from the bearer session token
pub struct AuthUser(pub user_entity::Model);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = MarketError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let user = auth_service::authenticate(state, token).await?;
        Ok(AuthUser(user))
    }
}

/// Authenticated user that must carry the admin role
pub struct AdminUser(pub user_entity::Model);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = MarketError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(MarketError::Forbidden("admin role required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

// Registration, login and profile endpoint handlers

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entity::users;
use crate::error::MarketResult;
use crate::handlers::{bearer_token, AppState, AuthUser};
use crate::services::auth_service;

/// User profile as exposed by the API (never includes the password hash)
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub wallet_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub(crate) fn profile(user: users::Model) -> UserProfile {
    UserProfile {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        wallet_address: user.wallet_address,
        created_at: user.created_at,
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub wallet_address: Option<String>,
}

/// Handler for POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> MarketResult<Json<UserProfile>> {
    let user = auth_service::register(
        &state,
        &body.name,
        &body.email,
        &body.password,
        body.wallet_address,
    )
    .await?;

    Ok(Json(profile(user)))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Handler for POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> MarketResult<Json<LoginResponse>> {
    let (token, user) = auth_service::login(&state, &body.email, &body.password).await?;

    Ok(Json(LoginResponse {
        token,
        user: profile(user),
    }))
}

/// Handler for POST /auth/logout - revokes the presented session token
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> MarketResult<Json<serde_json::Value>> {
    let token = bearer_token(&headers)?;
    auth_service::logout(&state, token).await?;
    Ok(Json(json!({ "status": "logged out" })))
}

/// Handler for GET /auth/me
pub async fn me(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(profile(user))
}

#[derive(Debug, Deserialize)]
pub struct WalletUpdateRequest {
    pub wallet_address: String,
}

/// Handler for PUT /auth/me/wallet
pub async fn update_wallet(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<WalletUpdateRequest>,
) -> MarketResult<Json<UserProfile>> {
    let updated = auth_service::set_wallet(&state, user, &body.wallet_address).await?;
    Ok(Json(profile(updated)))
}

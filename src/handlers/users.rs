// Admin user management endpoint handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::MarketResult;
use crate::handlers::auth::{profile, UserProfile};
use crate::handlers::{AdminUser, AppState};
use crate::services::auth_service;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub total: usize,
    pub users: Vec<UserProfile>,
}

/// Handler for GET /users - admin listing of all accounts
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> MarketResult<Json<UsersResponse>> {
    let users = state.repositories.users.find_all().await?;
    let users: Vec<UserProfile> = users.into_iter().map(profile).collect();

    Ok(Json(UsersResponse {
        total: users.len(),
        users,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: String,
}

/// Handler for PUT /users/{id}/role - admin role assignment
pub async fn update_role(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(user_id): Path<i32>,
    Json(body): Json<RoleUpdateRequest>,
) -> MarketResult<Json<UserProfile>> {
    let updated = auth_service::set_role(&state, user_id, &body.role).await?;
    Ok(Json(profile(updated)))
}

// Operator directory and rating endpoint handlers

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entity::operators;
use crate::error::{MarketError, MarketResult};
use crate::handlers::{AdminUser, AppState, AuthUser};
use crate::services::rating_service::{self, RatingSummary};

#[derive(Debug, Serialize)]
pub struct OperatorItem {
    pub id: i32,
    pub name_es: String,
    pub name_en: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub location: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn to_item(operator: operators::Model) -> OperatorItem {
    OperatorItem {
        id: operator.id,
        name_es: operator.name_es,
        name_en: operator.name_en,
        contact_email: operator.contact_email,
        contact_phone: operator.contact_phone,
        profile_image_url: operator.profile_image_url,
        location: operator.location,
        created_at: operator.created_at,
        updated_at: operator.updated_at,
    }
}

#[derive(Debug, Serialize)]
pub struct OperatorsResponse {
    pub total: usize,
    pub operators: Vec<OperatorItem>,
}

/// Handler for GET /operators
pub async fn list_operators(
    State(state): State<AppState>,
) -> MarketResult<Json<OperatorsResponse>> {
    let operators = state.repositories.operators.find_all().await?;
    let operators: Vec<OperatorItem> = operators.into_iter().map(to_item).collect();

    Ok(Json(OperatorsResponse {
        total: operators.len(),
        operators,
    }))
}

#[derive(Debug, Serialize)]
pub struct OperatorDetailResponse {
    #[serde(flatten)]
    pub operator: OperatorItem,
    pub average_rating: Option<Decimal>,
    pub rating_count: usize,
}

/// Handler for GET /operators/{id} - detail with rating aggregate
pub async fn get_operator(
    State(state): State<AppState>,
    Path(operator_id): Path<i32>,
) -> MarketResult<Json<OperatorDetailResponse>> {
    let operator = state
        .repositories
        .operators
        .get_by_id(operator_id)
        .await?
        .ok_or_else(|| MarketError::NotFound(format!("operator {} not found", operator_id)))?;

    let summary = rating_service::operator_ratings(&state, operator_id).await?;

    Ok(Json(OperatorDetailResponse {
        operator: to_item(operator),
        average_rating: summary.average,
        rating_count: summary.count,
    }))
}

#[derive(Debug, Deserialize)]
pub struct OperatorInput {
    pub name_es: String,
    pub name_en: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub location: Option<String>,
}

/// Handler for POST /operators - admin operator creation
pub async fn create_operator(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<OperatorInput>,
) -> MarketResult<Json<OperatorItem>> {
    if input.name_es.trim().is_empty() || input.name_en.trim().is_empty() {
        return Err(MarketError::InvalidRequest(
            "both locale names are required".to_string(),
        ));
    }
    if input.contact_email.trim().is_empty() {
        return Err(MarketError::InvalidRequest(
            "contact email is required".to_string(),
        ));
    }

    let now = chrono::Utc::now();
    let operator = state
        .repositories
        .operators
        .insert(operators::ActiveModel {
            name_es: Set(input.name_es.trim().to_string()),
            name_en: Set(input.name_en.trim().to_string()),
            contact_email: Set(input.contact_email.trim().to_string()),
            contact_phone: Set(input.contact_phone),
            profile_image_url: Set(input.profile_image_url),
            location: Set(input.location),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .await?;

    tracing::info!(operator_id = operator.id, "operator created");
    Ok(Json(to_item(operator)))
}

#[derive(Debug, Default, Deserialize)]
pub struct OperatorPatch {
    pub name_es: Option<String>,
    pub name_en: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub location: Option<String>,
}

/// Handler for PUT /operators/{id} - admin operator update
pub async fn update_operator(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(operator_id): Path<i32>,
    Json(patch): Json<OperatorPatch>,
) -> MarketResult<Json<OperatorItem>> {
    let current = state
        .repositories
        .operators
        .get_by_id(operator_id)
        .await?
        .ok_or_else(|| MarketError::NotFound(format!("operator {} not found", operator_id)))?;

    let mut changes: operators::ActiveModel = current.into();
    if let Some(v) = patch.name_es {
        changes.name_es = Set(v);
    }
    if let Some(v) = patch.name_en {
        changes.name_en = Set(v);
    }
    if let Some(v) = patch.contact_email {
        changes.contact_email = Set(v);
    }
    if let Some(v) = patch.contact_phone {
        changes.contact_phone = Set(Some(v));
    }
    if let Some(v) = patch.profile_image_url {
        changes.profile_image_url = Set(Some(v));
    }
    if let Some(v) = patch.location {
        changes.location = Set(Some(v));
    }
    changes.updated_at = Set(chrono::Utc::now());

    let operator = state.repositories.operators.update(changes).await?;
    Ok(Json(to_item(operator)))
}

/// Handler for DELETE /operators/{id} - admin operator removal
pub async fn delete_operator(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(operator_id): Path<i32>,
) -> MarketResult<Json<serde_json::Value>> {
    let removed = state
        .repositories
        .operators
        .delete_by_id(operator_id)
        .await?;
    if removed == 0 {
        return Err(MarketError::NotFound(format!(
            "operator {} not found",
            operator_id
        )));
    }

    tracing::info!(operator_id, "operator deleted");
    Ok(Json(json!({ "status": "deleted" })))
}

/// Handler for GET /operators/{id}/ratings
pub async fn get_operator_ratings(
    State(state): State<AppState>,
    Path(operator_id): Path<i32>,
) -> MarketResult<Json<RatingSummary>> {
    let summary = rating_service::operator_ratings(&state, operator_id).await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: i16,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub operator_id: i32,
    pub rating: i16,
    pub comment: Option<String>,
}

/// Handler for PUT /operators/{id}/rating - upsert the caller's rating
pub async fn rate_operator(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(operator_id): Path<i32>,
    Json(body): Json<RateRequest>,
) -> MarketResult<Json<RateResponse>> {
    let stored =
        rating_service::rate_operator(&state, operator_id, &user, body.rating, body.comment)
            .await?;

    Ok(Json(RateResponse {
        operator_id: stored.operator_id,
        rating: stored.rating,
        comment: stored.comment,
    }))
}

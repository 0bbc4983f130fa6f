use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Upstream error: {0}")]
    UpstreamError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type MarketResult<T> = Result<T, MarketError>;

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let (status, err_msg) = match self {
            MarketError::DatabaseError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            MarketError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            MarketError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            MarketError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            MarketError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            MarketError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            MarketError::UpstreamError(msg) => (StatusCode::BAD_GATEWAY, msg),
            MarketError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": err_msg
        }));

        (status, body).into_response()
    }
}

// DbError to MarketError conversion implementation
impl From<DbError> for MarketError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionError(msg) => MarketError::DatabaseError(msg),
            DbError::QueryError(msg) => MarketError::DatabaseError(msg),
        }
    }
}

impl From<sea_orm::DbErr> for MarketError {
    fn from(err: sea_orm::DbErr) -> Self {
        MarketError::DatabaseError(err.to_string())
    }
}

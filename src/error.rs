//! Error types for the Assetdesk server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "authentication", msg.clone())
            }
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, "authorization", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation", msg.clone()),
            AppError::Database(e) => {
                // Unique / foreign key violations are caller errors: the
                // invariant indexes reject the losing side of a race here.
                let db_err = e.as_database_error();
                if db_err.map(|d| d.is_unique_violation()).unwrap_or(false) {
                    (
                        StatusCode::CONFLICT,
                        "conflict",
                        "Duplicate value violates a uniqueness constraint".to_string(),
                    )
                } else if db_err
                    .map(|d| d.is_foreign_key_violation())
                    .unwrap_or(false)
                {
                    (
                        StatusCode::CONFLICT,
                        "conflict",
                        "Operation blocked by a referencing record".to_string(),
                    )
                } else if db_err.map(|d| d.is_check_violation()).unwrap_or(false) {
                    (
                        StatusCode::BAD_REQUEST,
                        "validation",
                        "Value violates a check constraint".to_string(),
                    )
                } else if db_err.and_then(|d| d.code()).as_deref() == Some("40001") {
                    // Serializable transactions abort the losing side of a
                    // concurrent write with a serialization failure
                    (
                        StatusCode::CONFLICT,
                        "conflict",
                        "Concurrent update, retry the request".to_string(),
                    )
                } else {
                    tracing::error!("Database error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "database",
                        "Database error".to_string(),
                    )
                }
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "rate_limited", msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

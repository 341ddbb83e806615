//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error(transparent)]
    Validation(#[from] crate::domain::DomainError),

    // Server errors (5xx)
    #[error(transparent)]
    Store(#[from] crate::store::EventStoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response body
///
/// Same envelope the success responses use, with `ok` pinned to false.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // 400 Bad Request: no row was written
            AppError::Validation(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error: fatal to this request only
            AppError::Store(e) => {
                tracing::error!("store error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Database(e) => {
                tracing::error!("database error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            ok: false,
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

//! Error handling for the Weather Sync Platform
//!
//! One taxonomy shared by the sync pipeline and the read API. Per-location
//! fetch failures are logged and skipped by the caller; they surface here so
//! the log line can say why.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A data-driven column name failed the allow-list check.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Required provider API key absent at startup.
    #[error("Missing provider credential: {0}")]
    MissingCredential(String),

    /// Provider answered with a non-success status.
    #[error("Provider HTTP {status}: {body}")]
    ProviderHttp { status: u16, body: String },

    /// Network or timeout failure talking to the provider.
    #[error("Provider transport error: {0}")]
    ProviderTransport(#[from] reqwest::Error),

    /// Provider response is missing a required field.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidIdentifier(_) => (StatusCode::BAD_REQUEST, "INVALID_IDENTIFIER"),
            AppError::MissingCredential(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MISSING_CREDENTIAL")
            }
            AppError::ProviderHttp { .. } => (StatusCode::BAD_GATEWAY, "PROVIDER_HTTP_ERROR"),
            AppError::ProviderTransport(_) => {
                (StatusCode::BAD_GATEWAY, "PROVIDER_TRANSPORT_ERROR")
            }
            AppError::MalformedResponse(_) => (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::Internal(_) | AppError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;

/**
 * Application Error Types
 *
 * This module defines the error types used across the HTTP handlers.
 *
 * # Error Categories
 *
 * - `Handler` - Request-level failures (validation, conflicts) with an
 *   explicit status code
 * - `Unauthorized` - Missing or invalid session credentials
 * - `Database` - Failures from the persistence layer
 * - `Media` - Failures storing an uploaded image
 * - `Serialization` - JSON serialization failures
 */

use crate::media::store::MediaError;
use axum::http::StatusCode;
use thiserror::Error;

/// Application error
///
/// This enum represents all errors that HTTP handlers can produce. Each
/// variant maps to an HTTP status code and a human-readable message.
///
/// # Usage
///
/// ```rust
/// use pulsechat::error::AppError;
/// use axum::http::StatusCode;
///
/// let err = AppError::handler(StatusCode::BAD_REQUEST, "All fields are required");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Request-level error with an explicit status code
    #[error("{message}")]
    Handler {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid session credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Database is not configured (DATABASE_URL unset or connection failed)
    #[error("Database unavailable")]
    DatabaseUnavailable,

    /// Persistence layer failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Media store failure
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// Serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Create a handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler {
            status,
            message: message.into(),
        }
    }

    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Handler` - the embedded status code
    /// - `Unauthorized` - 401 Unauthorized
    /// - `DatabaseUnavailable` - 503 Service Unavailable
    /// - `Database` - 404 Not Found for missing rows, 500 otherwise
    /// - `Media` - 400 Bad Request for malformed uploads, 500 otherwise
    /// - `Serialization` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Handler { status, .. } => *status,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Media(MediaError::InvalidDataUrl | MediaError::Decode(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Media(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    ///
    /// Internal failure details (database, serialization) are not echoed
    /// back to clients.
    pub fn message(&self) -> String {
        match self {
            Self::Handler { message, .. } => message.clone(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::DatabaseUnavailable => "Service unavailable".to_string(),
            Self::Database(sqlx::Error::RowNotFound) => "Not found".to_string(),
            Self::Database(_) | Self::Serialization(_) => "Internal Server Error".to_string(),
            Self::Media(e) => e.to_string(),
        }
    }
}

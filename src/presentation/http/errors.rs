//! HTTP error handling and response conversion.
//!
//! Structured error types mapped to HTTP status codes and JSON bodies. The
//! logged message keeps the full detail; the response body only carries a
//! user-safe summary.

use crate::domain::track::errors::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404).
    NotFound(String),

    /// Request validation failed (400).
    BadRequest(String),

    /// Access denied - authentication/authorization required (403).
    Forbidden(String),

    /// Request data failed validation (400).
    ValidationError(String),

    /// Rate limit exceeded (429).
    RateLimited,

    /// Database operation failed (500).
    Database(String),

    /// Storage/file operation failed (500).
    Storage(String),

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::RateLimited => write!(f, "Rate limit exceeded"),
            Self::Database(msg) => write!(f, "Database error: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "Resource not found".into(),
            Self::BadRequest(msg) => msg.clone(),
            Self::Forbidden(_) => "Access denied".into(),
            Self::ValidationError(msg) => msg.clone(),
            Self::RateLimited => "Too many requests, please try again later".into(),
            Self::Database(_) => "Database operation failed".into(),
            Self::Storage(_) => "File operation failed".into(),
            Self::Internal(_) => "Internal server error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                tracing::warn!("error={}", self);
            }
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::debug!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// === Domain Error Conversion ===

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::ValidationError(msg) => AppError::ValidationError(msg),
            DomainError::InfrastructureError(msg) => {
                tracing::error!(infrastructure_error = %msg);
                AppError::Internal(msg)
            }
        }
    }
}

// === Database Error Conversion ===

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found in database".into()),
            sqlx::Error::PoolTimedOut => {
                tracing::warn!("Database connection pool exhausted, timing out");
                AppError::Database("Connection pool exhausted".into())
            }
            sqlx::Error::PoolClosed => {
                tracing::error!("Database connection pool closed");
                AppError::Database("Database connection unavailable".into())
            }
            _ => {
                tracing::error!(database_error = %err);
                AppError::Database("Database error".into())
            }
        }
    }
}

// === Image Processing Error Conversion ===

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(_) => {
                tracing::warn!(image_format_error = %err);
                AppError::BadRequest("Unsupported image format".into())
            }
            image::ImageError::Decoding(_) => {
                tracing::warn!(image_decode_error = %err);
                AppError::BadRequest("Invalid image data".into())
            }
            image::ImageError::Limits(_) => {
                tracing::warn!(image_limits_error = %err);
                AppError::BadRequest("Image exceeds limits".into())
            }
            _ => {
                tracing::error!(image_error = %err);
                AppError::Storage("Image processing failed".into())
            }
        }
    }
}

// === General Fallback Error Conversion ===

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(anyhow_error = %err, "Unclassified error with chain");
        err.chain().for_each(|cause| {
            tracing::error!(cause = %cause, "Error source");
        });
        AppError::Internal("Operation failed".into())
    }
}

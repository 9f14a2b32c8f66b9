//! Error types.
//!
//! - [`ShortLinkError`] - outcome taxonomy of the link store, independent of HTTP
//! - [`AppError`] - HTTP-facing error rendered as a JSON body

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::RepositoryError;
use crate::utils::url_validator::UrlValidationError;

/// Errors surfaced by [`crate::application::services::LinkStore`].
///
/// Cache failures never appear here. Store failures that are not a missing
/// record are wrapped in [`ShortLinkError::Store`].
#[derive(Debug, thiserror::Error)]
pub enum ShortLinkError {
    /// The submitted URL is malformed; the caller must fix the input.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),

    /// No record exists for the key.
    #[error("short link not found: {key}")]
    NotFound { key: String },

    /// Every candidate key collided; the whole operation can be retried later.
    #[error("no unique key found after {attempts} attempts")]
    CreationExhausted { attempts: usize },

    #[error("storage failure: {0}")]
    Store(#[source] RepositoryError),
}

impl ShortLinkError {
    /// Returns true when retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::CreationExhausted { .. } | Self::Store(_))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application error mapped to an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<ShortLinkError> for AppError {
    fn from(err: ShortLinkError) -> Self {
        match err {
            ShortLinkError::InvalidUrl(reason) => {
                AppError::bad_request("Invalid URL", json!({ "reason": reason.to_string() }))
            }
            ShortLinkError::NotFound { key } => {
                AppError::not_found("Short link not found", json!({ "key": key }))
            }
            ShortLinkError::CreationExhausted { attempts } => {
                tracing::error!(attempts, "Short link creation exhausted all key attempts");
                AppError::internal(
                    "Failed to create short URL, try again later",
                    json!({ "retryable": true }),
                )
            }
            ShortLinkError::Store(e) => {
                tracing::error!(error = %e, "Short link store failure");
                AppError::internal("Server error, try again later", json!({ "retryable": true }))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(errors.field_errors()).unwrap_or(Value::Null);
        AppError::bad_request("Request validation failed", details)
    }
}

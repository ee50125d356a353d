//! Unified error handling for the HTTP surface.
//!
//! Provides a single error type that can be converted to Axum HTTP responses.
//! Validation and conflict errors are client-facing and recoverable; storage
//! and internal errors are logged and reported without details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("{field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("{}", domain::MSG_PASSWORDS_DO_NOT_MATCH)]
    PasswordMismatch,

    #[error("User must be at least {minimum_age} years old.")]
    Underage { minimum_age: i32 },

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Resource errors
    #[error("{0}")]
    Conflict(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidField { .. } => "VALIDATION_ERROR",
            AppError::PasswordMismatch => "PASSWORD_MISMATCH",
            AppError::Underage { .. } => "UNDERAGE",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Conflict(_) => "CONFLICT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidField { .. }
            | AppError::PasswordMismatch
            | AppError::Underage { .. }
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller can fix the request and retry
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidField { field, reason } => format!("{} {}", field, reason),
            AppError::BadRequest(msg) | AppError::Conflict(msg) => msg.clone(),

            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    fn field(&self) -> Option<String> {
        match self {
            AppError::InvalidField { field, .. } => Some(field.to_string()),
            _ => None,
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                field: self.field(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidField { field, reason } => AppError::InvalidField { field, reason },
            DomainError::PasswordMismatch => AppError::PasswordMismatch,
            DomainError::Underage { minimum_age } => AppError::Underage { minimum_age },
            DomainError::EmailTaken => AppError::Conflict(domain::MSG_EMAIL_TAKEN.to_string()),
            DomainError::Password(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::constants::{MSG_EMAIL_TAKEN, MSG_PASSWORDS_DO_NOT_MATCH};

/// Domain-specific errors for registration rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field is missing, malformed or out of bounds
    #[error("{field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Password and confirmation differ
    #[error("{}", MSG_PASSWORDS_DO_NOT_MATCH)]
    PasswordMismatch,

    /// Applicant is younger than the minimum age
    #[error("User must be at least {minimum_age} years old.")]
    Underage { minimum_age: i32 },

    /// Another user already holds this email (case-insensitive)
    #[error("{}", MSG_EMAIL_TAKEN)]
    EmailTaken,

    /// Password hashing failed
    #[error("Password error: {0}")]
    Password(String),
}

impl DomainError {
    /// Create a field validation error
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Registration
// =============================================================================

/// Maximum length of first and last names, in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum age (in whole years, UTC) required to register
pub const MINIMUM_AGE: i32 = 18;

/// Argon2 rejects associated data longer than this
pub const MAX_PASSWORD_CONTEXT_BYTES: usize = 32;

// =============================================================================
// Field names (wire names, used in error reports)
// =============================================================================

pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_CONFIRM_PASSWORD: &str = "confirmPassword";
pub const FIELD_DATE_OF_BIRTH: &str = "dateOfBirth";

// =============================================================================
// Messages
// =============================================================================

pub const MSG_PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";
pub const MSG_EMAIL_TAKEN: &str = "Email already registered.";
pub const MSG_REGISTRATION_SUCCESSFUL: &str = "Registration successful.";

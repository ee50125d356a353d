//! Domain layer - Core registration rules and entities.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the registration request, the validator, password hashing and the user
//! entity shapes shared with the storage and HTTP layers.

pub mod constants;
pub mod error;
pub mod password;
pub mod registration;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{Password, PasswordContext};
pub use registration::{RegistrationRequest, ValidRegistration};
pub use user::{normalize_email, NewUser, User, UserSummary};
pub use validation::{age_on, validate, Constraint, FieldRule, REGISTRATION_RULES};

//! User domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::password::PasswordContext;

/// User domain entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Email normalized for identity comparison
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// A user ready to be persisted. Storage assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub password_hash: String,
}

impl NewUser {
    /// Create a new user without a password hash yet
    pub fn new(first_name: String, last_name: String, email: String, date_of_birth: NaiveDate) -> Self {
        Self {
            first_name,
            last_name,
            email,
            date_of_birth,
            password_hash: String::new(),
        }
    }

    /// Attach the password hash computed for this user
    pub fn with_password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = password_hash;
        self
    }

    /// Materialize the stored entity once storage has assigned identity.
    pub fn into_user(self, id: Uuid, created_at: DateTime<Utc>) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            password_hash: self.password_hash,
            created_at,
        }
    }
}

impl PasswordContext for NewUser {
    fn context_bytes(&self) -> Vec<u8> {
        normalize_email(&self.email).into_bytes()
    }
}

/// User summary (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Unique user identifier
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            date_of_birth: user.date_of_birth,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            date_of_birth: user.date_of_birth,
            created_at: user.created_at,
        }
    }
}

/// Two emails name the same identity when equal after lowercasing.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

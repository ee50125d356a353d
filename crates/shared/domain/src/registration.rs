//! Registration request and its validated form.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::constants::{
    FIELD_CONFIRM_PASSWORD, FIELD_DATE_OF_BIRTH, FIELD_EMAIL, FIELD_FIRST_NAME, FIELD_LAST_NAME,
    FIELD_PASSWORD,
};
use crate::user::NewUser;

/// Registration payload as received from a client.
///
/// Every field is optional here so that a missing field is reported by the
/// validator with its name instead of failing deserialization.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub date_of_birth: Option<String>,
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("date_of_birth", &self.date_of_birth)
            .finish()
    }
}

impl RegistrationRequest {
    /// Look up a field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            FIELD_FIRST_NAME => &self.first_name,
            FIELD_LAST_NAME => &self.last_name,
            FIELD_EMAIL => &self.email,
            FIELD_PASSWORD => &self.password,
            FIELD_CONFIRM_PASSWORD => &self.confirm_password,
            FIELD_DATE_OF_BIRTH => &self.date_of_birth,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Parse a date of birth: a plain calendar date, or the date part of an
/// RFC 3339 timestamp.
pub fn parse_date_of_birth(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// A registration that passed every validator check.
#[derive(Clone)]
pub struct ValidRegistration {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    date_of_birth: NaiveDate,
}

impl std::fmt::Debug for ValidRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidRegistration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("date_of_birth", &self.date_of_birth)
            .finish()
    }
}

impl ValidRegistration {
    /// Names and email are trimmed; the password is kept verbatim.
    pub(crate) fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            date_of_birth,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// The user to persist, still without a password hash.
    pub fn new_user(&self) -> NewUser {
        NewUser::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.date_of_birth,
        )
    }
}

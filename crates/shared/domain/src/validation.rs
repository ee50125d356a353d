//! Registration validator.
//!
//! Field constraints are declared in [`REGISTRATION_RULES`] and checked in
//! table order, followed by the password confirmation and the minimum age.
//! The first failure is reported. Nothing here touches storage.

use chrono::{Datelike, NaiveDate};
use validator::ValidateEmail;

use crate::constants::{
    FIELD_CONFIRM_PASSWORD, FIELD_DATE_OF_BIRTH, FIELD_EMAIL, FIELD_FIRST_NAME, FIELD_LAST_NAME,
    FIELD_PASSWORD, MAX_NAME_LENGTH, MINIMUM_AGE, MIN_PASSWORD_LENGTH,
};
use crate::error::{DomainError, DomainResult};
use crate::registration::{parse_date_of_birth, RegistrationRequest, ValidRegistration};

/// A single constraint on a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Present and not blank
    Required,
    /// At most this many characters
    MaxChars(usize),
    /// At least this many characters
    MinChars(usize),
    /// Email address syntax (checked on the trimmed value)
    Email,
    /// Parseable calendar date
    Date,
}

impl Constraint {
    /// Check a field value. Absent values only fail `Required`.
    pub fn check(&self, value: Option<&str>) -> Result<(), String> {
        let Some(value) = value else {
            return match self {
                Constraint::Required => Err("is required".to_string()),
                _ => Ok(()),
            };
        };

        match *self {
            Constraint::Required if value.trim().is_empty() => Err("is required".to_string()),
            Constraint::MaxChars(max) if value.chars().count() > max => {
                Err(format!("must be at most {} characters", max))
            }
            Constraint::MinChars(min) if value.chars().count() < min => {
                Err(format!("must be at least {} characters", min))
            }
            Constraint::Email if !value.trim().validate_email() => {
                Err("must be a valid email address".to_string())
            }
            Constraint::Date if parse_date_of_birth(value).is_none() => {
                Err("must be a valid date (YYYY-MM-DD)".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Constraints for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub constraints: &'static [Constraint],
}

/// Registration field constraints, in reporting order.
pub const REGISTRATION_RULES: &[FieldRule] = &[
    FieldRule {
        field: FIELD_FIRST_NAME,
        constraints: &[Constraint::Required, Constraint::MaxChars(MAX_NAME_LENGTH)],
    },
    FieldRule {
        field: FIELD_LAST_NAME,
        constraints: &[Constraint::Required, Constraint::MaxChars(MAX_NAME_LENGTH)],
    },
    FieldRule {
        field: FIELD_EMAIL,
        constraints: &[Constraint::Required, Constraint::Email],
    },
    FieldRule {
        field: FIELD_PASSWORD,
        constraints: &[Constraint::Required, Constraint::MinChars(MIN_PASSWORD_LENGTH)],
    },
    FieldRule {
        field: FIELD_CONFIRM_PASSWORD,
        constraints: &[Constraint::Required],
    },
    FieldRule {
        field: FIELD_DATE_OF_BIRTH,
        constraints: &[Constraint::Required, Constraint::Date],
    },
];

/// Check every declared field constraint.
pub fn check_fields(request: &RegistrationRequest) -> DomainResult<()> {
    for rule in REGISTRATION_RULES {
        let value = request.field(rule.field);
        for constraint in rule.constraints {
            constraint
                .check(value)
                .map_err(|reason| DomainError::invalid_field(rule.field, reason))?;
        }
    }
    Ok(())
}

/// Password and confirmation must be identical, character for character.
pub fn check_passwords_match(password: &str, confirm_password: &str) -> DomainResult<()> {
    if password != confirm_password {
        return Err(DomainError::PasswordMismatch);
    }
    Ok(())
}

/// Whole years between `date_of_birth` and `today`.
///
/// One less than the year difference while this year's birthday is still
/// ahead. A 29 February birthday counts as reached on 1 March in common years.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Applicant must be at least [`MINIMUM_AGE`] on `today` (UTC).
pub fn check_minimum_age(date_of_birth: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if age_on(date_of_birth, today) < MINIMUM_AGE {
        return Err(DomainError::Underage {
            minimum_age: MINIMUM_AGE,
        });
    }
    Ok(())
}

/// Run every check and return the validated registration.
pub fn validate(request: &RegistrationRequest, today: NaiveDate) -> DomainResult<ValidRegistration> {
    check_fields(request)?;

    let required = |field: &'static str| {
        request
            .field(field)
            .ok_or_else(|| DomainError::invalid_field(field, "is required"))
    };
    let password = required(FIELD_PASSWORD)?;
    check_passwords_match(password, required(FIELD_CONFIRM_PASSWORD)?)?;

    let date_of_birth = parse_date_of_birth(required(FIELD_DATE_OF_BIRTH)?)
        .ok_or_else(|| DomainError::invalid_field(FIELD_DATE_OF_BIRTH, "must be a valid date"))?;
    check_minimum_age(date_of_birth, today)?;

    Ok(ValidRegistration::new(
        required(FIELD_FIRST_NAME)?,
        required(FIELD_LAST_NAME)?,
        required(FIELD_EMAIL)?,
        password,
        date_of_birth,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_request() -> RegistrationRequest {
        RegistrationRequest {
            first_name: Some("Ann".to_string()),
            last_name: Some("Lee".to_string()),
            email: Some("Ann@X.com".to_string()),
            password: Some("longpass1".to_string()),
            confirm_password: Some("longpass1".to_string()),
            date_of_birth: Some("2000-01-01".to_string()),
        }
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn invalid_field(result: DomainResult<ValidRegistration>) -> &'static str {
        match result {
            Err(DomainError::InvalidField { field, .. }) => field,
            other => panic!("expected field error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request_passes_and_trims() {
        let mut request = valid_request();
        request.first_name = Some("  Ann ".to_string());
        request.email = Some(" Ann@X.com ".to_string());

        let valid = validate(&request, today()).unwrap();
        let user = valid.new_user();

        assert_eq!(user.first_name, "Ann");
        assert_eq!(user.email, "Ann@X.com");
        assert_eq!(user.date_of_birth, date(2000, 1, 1));
        assert_eq!(valid.password(), "longpass1");
    }

    #[test]
    fn test_missing_field_is_reported_by_name() {
        let mut request = valid_request();
        request.last_name = None;

        assert_eq!(invalid_field(validate(&request, today())), FIELD_LAST_NAME);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut request = valid_request();
        request.first_name = Some("   ".to_string());

        assert_eq!(invalid_field(validate(&request, today())), FIELD_FIRST_NAME);
    }

    #[test]
    fn test_name_length_limit() {
        let mut request = valid_request();
        request.first_name = Some("a".repeat(MAX_NAME_LENGTH));
        assert!(validate(&request, today()).is_ok());

        request.first_name = Some("a".repeat(MAX_NAME_LENGTH + 1));
        assert_eq!(invalid_field(validate(&request, today())), FIELD_FIRST_NAME);
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        let mut request = valid_request();
        request.last_name = Some("é".repeat(MAX_NAME_LENGTH));

        assert!(validate(&request, today()).is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let mut request = valid_request();
        request.email = Some("not-an-email".to_string());

        assert_eq!(invalid_field(validate(&request, today())), FIELD_EMAIL);
    }

    #[test]
    fn test_password_too_short() {
        let mut request = valid_request();
        request.password = Some("short".to_string());
        request.confirm_password = Some("short".to_string());

        assert_eq!(invalid_field(validate(&request, today())), FIELD_PASSWORD);
    }

    #[test]
    fn test_password_minimum_length() {
        let mut request = valid_request();
        request.password = Some("12345678".to_string());
        request.confirm_password = Some("12345678".to_string());

        assert!(validate(&request, today()).is_ok());
    }

    #[test]
    fn test_unparseable_date_of_birth() {
        let mut request = valid_request();
        request.date_of_birth = Some("01/01/2000".to_string());

        assert_eq!(invalid_field(validate(&request, today())), FIELD_DATE_OF_BIRTH);
    }

    #[test]
    fn test_field_errors_win_over_business_rules() {
        let mut request = valid_request();
        request.email = None;
        request.confirm_password = Some("different1".to_string());
        request.date_of_birth = Some("2020-01-01".to_string());

        assert_eq!(invalid_field(validate(&request, today())), FIELD_EMAIL);
    }

    #[test]
    fn test_password_mismatch() {
        let mut request = valid_request();
        request.confirm_password = Some("longpass2".to_string());

        let err = validate(&request, today()).unwrap_err();
        assert_eq!(err, DomainError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match.");
    }

    #[test]
    fn test_password_match_is_exact() {
        assert!(check_passwords_match("longpass1", "longpass1").is_ok());
        assert!(check_passwords_match("longpass1", "LongPass1").is_err());
        assert!(check_passwords_match("longpass1", "longpass1 ").is_err());
    }

    #[test]
    fn test_mismatch_checked_before_age() {
        let mut request = valid_request();
        request.confirm_password = Some("longpass2".to_string());
        request.date_of_birth = Some("2020-01-01".to_string());

        assert_eq!(validate(&request, today()).unwrap_err(), DomainError::PasswordMismatch);
    }

    #[test]
    fn test_age_on() {
        assert_eq!(age_on(date(2000, 1, 1), date(2024, 6, 15)), 24);
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 15)), 24);
        assert_eq!(age_on(date(2000, 6, 16), date(2024, 6, 15)), 23);
        assert_eq!(age_on(date(2000, 7, 1), date(2024, 6, 15)), 23);
    }

    #[test]
    fn test_eighteenth_birthday_is_eligible() {
        assert!(check_minimum_age(date(2006, 6, 15), date(2024, 6, 15)).is_ok());
    }

    #[test]
    fn test_day_before_eighteenth_birthday_is_underage() {
        let err = check_minimum_age(date(2006, 6, 16), date(2024, 6, 15)).unwrap_err();

        assert_eq!(err, DomainError::Underage { minimum_age: 18 });
        assert_eq!(err.to_string(), "User must be at least 18 years old.");
    }

    #[test]
    fn test_leap_day_birthday() {
        // Born 29 Feb 2004: not yet 18 on 28 Feb 2022, 18 on 1 Mar 2022
        assert_eq!(age_on(date(2004, 2, 29), date(2022, 2, 28)), 17);
        assert_eq!(age_on(date(2004, 2, 29), date(2022, 3, 1)), 18);
        assert_eq!(age_on(date(2004, 2, 29), date(2024, 2, 29)), 20);
    }

    #[test]
    fn test_future_date_of_birth_is_underage() {
        let mut request = valid_request();
        request.date_of_birth = Some("2030-01-01".to_string());

        assert!(matches!(
            validate(&request, today()),
            Err(DomainError::Underage { .. })
        ));
    }
}

//! Registration service tests over the in-memory repository.

use std::sync::Arc;

use chrono::{Months, NaiveDate};

use common::AppError;
use domain::{RegistrationRequest, MINIMUM_AGE};
use user_service_lib::repository::{InMemoryUserRepository, UserRepository};
use user_service_lib::service::{utc_today, UserManager, UserService};

fn request(email: &str) -> RegistrationRequest {
    RegistrationRequest {
        first_name: Some("Ann".to_string()),
        last_name: Some("Lee".to_string()),
        email: Some(email.to_string()),
        password: Some("longpass1".to_string()),
        confirm_password: Some("longpass1".to_string()),
        date_of_birth: Some("2000-01-01".to_string()),
    }
}

fn years_ago(years: u32) -> NaiveDate {
    utc_today()
        .checked_sub_months(Months::new(12 * years))
        .expect("date in range")
}

fn setup() -> (Arc<InMemoryUserRepository>, UserManager) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let service = UserManager::new(repo.clone());
    (repo, service)
}

#[tokio::test]
async fn test_register_then_conflict_on_case_variant() {
    let (repo, service) = setup();

    let first = service.register(request("Ann@X.com")).await.unwrap();
    let second = service.register(request("ann@x.com")).await;

    assert_eq!(first.email, "Ann@X.com");
    assert!(matches!(second, Err(AppError::Conflict(_))));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_stored_hash_verifies_original_password() {
    let (repo, service) = setup();

    let summary = service.register(request("ann@x.com")).await.unwrap();
    let user = repo
        .find_by_email_case_insensitive("ANN@X.COM")
        .await
        .unwrap()
        .expect("user stored");

    assert_eq!(user.id, summary.id);
    assert_ne!(user.password_hash, "longpass1");
    assert!(domain::password::verify(&user.password_hash, "longpass1"));
    assert!(!domain::password::verify(&user.password_hash, "longpass2"));
}

#[tokio::test]
async fn test_same_password_hashes_differ_between_users() {
    let (repo, service) = setup();

    service.register(request("ann@x.com")).await.unwrap();
    service.register(request("bob@x.com")).await.unwrap();

    let users = repo.list().await.unwrap();
    assert_ne!(users[0].password_hash, users[1].password_hash);
}

#[tokio::test]
async fn test_password_mismatch_creates_nothing() {
    let (repo, service) = setup();
    let mut mismatched = request("ann@x.com");
    mismatched.confirm_password = Some("longpass2".to_string());

    let result = service.register(mismatched).await;

    assert!(matches!(result, Err(AppError::PasswordMismatch)));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_seventeen_years_old_is_underage() {
    let (repo, service) = setup();
    let mut young = request("ann@x.com");
    young.date_of_birth = Some(years_ago(17).to_string());

    let result = service.register(young).await;

    assert!(matches!(
        result,
        Err(AppError::Underage { minimum_age }) if minimum_age == MINIMUM_AGE
    ));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_exactly_eighteen_today_is_accepted() {
    let (_, service) = setup();
    let mut adult = request("ann@x.com");
    adult.date_of_birth = Some(years_ago(18).to_string());

    assert!(service.register(adult).await.is_ok());
}

#[tokio::test]
async fn test_field_error_creates_nothing() {
    let (repo, service) = setup();
    let mut invalid = request("ann@x.com");
    invalid.first_name = Some("x".repeat(51));

    let result = service.register(invalid).await;

    assert!(matches!(
        result,
        Err(AppError::InvalidField { field: "firstName", .. })
    ));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_names_and_email_are_trimmed() {
    let (_, service) = setup();
    let mut padded = request("  ann@x.com  ");
    padded.first_name = Some("  Ann".to_string());
    padded.last_name = Some("Lee  ".to_string());

    let summary = service.register(padded).await.unwrap();

    assert_eq!(summary.first_name, "Ann");
    assert_eq!(summary.last_name, "Lee");
    assert_eq!(summary.email, "ann@x.com");
}

#[tokio::test]
async fn test_list_returns_every_registration_in_order() {
    let (_, service) = setup();
    let emails = ["a@x.com", "b@x.com", "c@x.com"];
    for email in emails {
        service.register(request(email)).await.unwrap();
    }

    let users = service.list_users().await.unwrap();

    assert_eq!(users.len(), emails.len());
    let listed: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(listed, emails);
}

#[tokio::test]
async fn test_concurrent_duplicates_register_once() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let service = Arc::new(UserManager::new(repo.clone()));

    let handles: Vec<_> = ["Ann@X.com", "ann@x.com", "ANN@X.COM", "aNn@x.CoM"]
        .into_iter()
        .map(|email| {
            let service = service.clone();
            tokio::spawn(async move { service.register(request(email)).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert!(matches!(e, AppError::Conflict(_))),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(repo.len().await, 1);
}

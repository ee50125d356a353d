//! User service - registration and listing.
//!
//! Validation runs before any storage access. A user row exists only after
//! every check passed and the insert succeeded.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{validate, Password, RegistrationRequest, UserSummary, MSG_EMAIL_TAKEN};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and persist a new user
    async fn register(&self, request: RegistrationRequest) -> AppResult<UserSummary>;

    /// List all users in insertion order, without password hashes
    async fn list_users(&self) -> AppResult<Vec<UserSummary>>;

    /// Check that storage is reachable
    async fn health_check(&self) -> AppResult<()>;
}

/// Current calendar date in UTC.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    today: fn() -> NaiveDate,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self::with_clock(repo, utc_today)
    }

    /// Create a service whose age checks use `today` as the current date
    pub fn with_clock(repo: Arc<dyn UserRepository>, today: fn() -> NaiveDate) -> Self {
        Self { repo, today }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, request: RegistrationRequest) -> AppResult<UserSummary> {
        let registration = validate(&request, (self.today)()).map_err(|e| {
            tracing::debug!("Registration rejected: {}", e);
            AppError::from(e)
        })?;

        if self
            .repo
            .find_by_email_case_insensitive(registration.email())
            .await?
            .is_some()
        {
            tracing::warn!("Registration rejected: email already registered");
            return Err(AppError::conflict(MSG_EMAIL_TAKEN));
        }

        // Argon2 runs on the blocking pool
        let new_user = registration.new_user();
        let password = registration.password().to_string();
        let context = new_user.clone();
        let password_hash = tokio::task::spawn_blocking(move || Password::hash_for(&context, &password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))??
            .into_string();

        let user = self
            .repo
            .insert(new_user.with_password_hash(password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(UserSummary::from(user))
    }

    async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        let users = self.repo.list().await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    async fn health_check(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}

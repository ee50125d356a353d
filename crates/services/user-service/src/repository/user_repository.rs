//! User repository: the storage collaborator for registration.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{normalize_email, NewUser, User, MSG_EMAIL_TAKEN};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations must reject a second user whose email equals an existing
/// one after lowercasing, reporting it as [`AppError::Conflict`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the user whose email matches `email` ignoring case
    async fn find_by_email_case_insensitive(&self, email: &str) -> AppResult<Option<User>>;

    /// Persist a new user, assigning `id` and `created_at`
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// List all users in insertion order
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Check that storage is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// SeaORM implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique violations on insert mean another registration won the race.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!("Unique constraint rejected user insert: {}", detail);
            AppError::conflict(MSG_EMAIL_TAKEN)
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email_case_insensitive(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::EmailNormalized.eq(normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email_normalized: Set(normalize_email(&user.email)),
            email: Set(user.email),
            date_of_birth: Set(user.date_of_birth),
            password_hash: Set(user.password_hash),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(User::from(model))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}

//! In-memory implementation of UserRepository (for development/testing).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{normalize_email, NewUser, User, MSG_EMAIL_TAKEN};

use super::UserRepository;

/// Keeps users in insertion order behind an async lock.
///
/// The uniqueness check and the push happen under one write lock, which
/// plays the role of the database's unique index.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email_case_insensitive(&self, email: &str) -> AppResult<Option<User>> {
        let email = normalize_email(email);
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.normalized_email() == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        let email = normalize_email(&user.email);
        if users.iter().any(|u| u.normalized_email() == email) {
            return Err(AppError::conflict(MSG_EMAIL_TAKEN));
        }

        let user = user.into_user(Uuid::new_v4(), Utc::now());
        users.push(user.clone());

        tracing::debug!(user_id = %user.id, "Stored user in memory");
        Ok(user)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser::new(
            "Ann".to_string(),
            "Lee".to_string(),
            email.to_string(),
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        )
        .with_password_hash("hash".to_string())
    }

    #[tokio::test]
    async fn test_insert_assigns_identity() {
        let repo = InMemoryUserRepository::new();
        let before = Utc::now();

        let user = repo.insert(new_user("ann@x.com")).await.unwrap();

        assert!(user.created_at >= before);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_ignores_case() {
        let repo = InMemoryUserRepository::new();
        let stored = repo.insert(new_user("Ann@X.com")).await.unwrap();

        let found = repo.find_by_email_case_insensitive("ANN@x.COM").await.unwrap();

        assert_eq!(found.map(|u| u.id), Some(stored.id));
        assert!(repo
            .find_by_email_case_insensitive("bob@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_case_insensitive_duplicate() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("Ann@X.com")).await.unwrap();

        let result = repo.insert(new_user("ann@x.com")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryUserRepository::new();
        for email in ["c@x.com", "a@x.com", "b@x.com"] {
            repo.insert(new_user(email)).await.unwrap();
        }

        let emails: Vec<String> = repo.list().await.unwrap().into_iter().map(|u| u.email).collect();

        assert_eq!(emails, vec!["c@x.com", "a@x.com", "b@x.com"]);
    }
}

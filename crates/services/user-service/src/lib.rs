//! User Service Library
//!
//! User registration backend: validates registration requests, hashes
//! passwords, persists users with case-insensitive unique emails and lists
//! them over HTTP.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{InMemoryUserRepository, UserRepository, UserStore};
use crate::service::UserManager;

/// Where users are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Relational database at `DATABASE_URL`
    Database,
    /// Process memory; data is lost on exit
    InMemory,
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Build the application state around a repository.
pub fn build_state(repo: Arc<dyn UserRepository>) -> AppState {
    AppState::new(Arc::new(UserManager::new(repo)))
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(
    config: UserServiceConfig,
    backend: StorageBackend,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo: Arc<dyn UserRepository> = match backend {
        StorageBackend::Database => {
            let db = Database::connect(&config.database).await?;
            Arc::new(UserStore::new(db.get_connection()))
        }
        StorageBackend::InMemory => {
            tracing::warn!("Using in-memory storage; registrations will not persist");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let app = create_router(build_state(repo));

    let addr: SocketAddr = config.service.addr().parse()?;
    info!("{} listening on {}", config.service.service_name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

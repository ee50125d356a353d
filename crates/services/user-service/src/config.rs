//! User service configuration.

use common::{DatabaseConfig, ServiceConfig};

/// Environment variable prefix for this service
const ENV_PREFIX: &str = "USER_SERVICE";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env("user-service", ENV_PREFIX, DEFAULT_PORT),
            database: DatabaseConfig::from_env(ENV_PREFIX),
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                port: DEFAULT_PORT,
                ..Default::default()
            },
            database: DatabaseConfig::default(),
        }
    }
}

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Runtime configuration, resolved once at process start.
///
/// The admin credential pair and the token signing key live here rather than
/// in module-level constants so tests and deployments can inject their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: i64,
    pub admin_username: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://pharmacy.db".to_string()),
            max_connections: env::var("MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "your-secret-key".to_string()),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
        })
    }

    /// Configuration for tests: in-memory database, fixed credentials.
    pub fn for_tests() -> Self {
        Config {
            environment: "test".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

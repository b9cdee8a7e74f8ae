//! Configuration module for environment variables and application settings

use anyhow::{Result, anyhow};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Symmetric secret used to sign and verify auth tokens
    pub secret_key: String,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Server configuration
    pub server: ServerConfig,

    /// Allowed CORS origin for the browser client
    pub cors_origin: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: usize,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `SECRET_KEY` and `DATABASE_URL` are mandatory; a missing value is a
    /// startup error rather than something discovered on the first request.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            secret_key: env::var("SECRET_KEY")
                .map_err(|_| anyhow!("SECRET_KEY environment variable is required"))?,

            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| anyhow!("DATABASE_URL environment variable is required"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "16".to_string())
                    .parse()
                    .unwrap_or(16),
            },

            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3030".to_string())
                    .parse()
                    .unwrap_or(3030),
            },

            cors_origin: env::var("CLIENT_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so the missing-key and
    // happy-path cases run inside one test to avoid racing each other.
    #[test]
    fn from_env_requires_secret_and_database_url() {
        unsafe {
            env::remove_var("SECRET_KEY");
            env::remove_var("DATABASE_URL");
        }
        assert!(Config::from_env().is_err());

        unsafe {
            env::set_var("SECRET_KEY", "test-secret");
        }
        assert!(Config::from_env().is_err());

        unsafe {
            env::set_var("DATABASE_URL", "postgres://postgres@localhost:5432/protrack");
            env::set_var("PORT", "4040");
        }
        let config = Config::from_env().expect("config should load");
        assert_eq!(config.secret_key, "test-secret");
        assert_eq!(config.server.port, 4040);
        assert_eq!(config.database.max_connections, 16);
    }
}

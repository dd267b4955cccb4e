//! Configuration management for taskserve.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `TASKS_SEED_PATH` - Optional. Path to a JSON file holding initial
//!   tasks. Defaults to `task.json`. A missing or unreadable file is
//!   tolerated and the server starts with an empty task list.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Path to the optional startup seed file
    pub seed_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT` is not a valid port
    /// number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let seed_path = std::env::var("TASKS_SEED_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("task.json"));

        Ok(Self {
            host,
            port,
            seed_path,
        })
    }

    /// Create a config with a custom seed path (useful for testing).
    pub fn new(seed_path: PathBuf) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            seed_path,
        }
    }
}

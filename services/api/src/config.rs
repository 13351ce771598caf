//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub log_level: Level,
    pub cors_origin: HeaderValue,
    /// Reject status updates that move a donation backwards.
    pub enforce_forward_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8001)),
            database_url: None,
            log_level: Level::INFO,
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            enforce_forward_status: true,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // --- Server Settings ---
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => defaults.bind_address,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let log_level = match lookup("RUST_LOG") {
            Some(raw) => raw.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", raw),
                )
            })?,
            None => defaults.log_level,
        };

        // --- Frontend Settings ---
        let cors_origin = match lookup("CORS_ORIGIN") {
            Some(raw) => raw.parse::<HeaderValue>().map_err(|e| {
                ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
            })?,
            None => defaults.cors_origin,
        };

        // --- Business Rules ---
        let enforce_forward_status = match lookup("ENFORCE_FORWARD_STATUS").as_deref() {
            None => defaults.enforce_forward_status,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(ConfigError::InvalidValue(
                    "ENFORCE_FORWARD_STATUS".to_string(),
                    format!("'{}' is not a boolean", other),
                ))
            }
        };

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            cors_origin,
            enforce_forward_status,
        })
    }
}

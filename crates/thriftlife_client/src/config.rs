//! crates/thriftlife_client/src/config.rs
//!
//! Where the client finds the backend.

use reqwest::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Client settings loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub backend_url: Url,
}

impl ClientConfig {
    pub const DEFAULT_BACKEND_URL: &'static str = "http://localhost:8001";

    /// Reads `THRIFTLIFE_BACKEND_URL`, consulting a `.env` file outside of tests.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        let raw = std::env::var("THRIFTLIFE_BACKEND_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BACKEND_URL.to_string());
        Self::with_backend(&raw)
    }

    pub fn with_backend(raw: &str) -> Result<Self, ConfigError> {
        let backend_url = Url::parse(raw).map_err(|e| {
            ConfigError::InvalidValue("THRIFTLIFE_BACKEND_URL".to_string(), e.to_string())
        })?;
        if backend_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue(
                "THRIFTLIFE_BACKEND_URL".to_string(),
                format!("'{}' cannot be used as a base URL", raw),
            ));
        }
        Ok(Self { backend_url })
    }
}

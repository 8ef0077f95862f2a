//! Client configuration loaded from environment variables.
//!
//! Nothing here is secret: the crate only ever holds tokens issued by the
//! backend, never signing keys.

use std::env;
use std::path::PathBuf;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the EVShare REST backend
    pub api_base_url: String,
    /// Path for the durable session file; `None` keeps the session in memory
    pub session_file: Option<PathBuf>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            session_file: None,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("EVSHARE_API_URL")
                .map_err(|_| ConfigError::Missing("EVSHARE_API_URL"))?,
            session_file: env::var("EVSHARE_SESSION_FILE").ok().map(PathBuf::from),
            request_timeout_secs: env::var("EVSHARE_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

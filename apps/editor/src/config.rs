use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Editor configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API, e.g. `http://localhost:8000/api`.
    pub api_base_url: String,
    /// Bearer token forwarded on every request. Issued by the host's auth flow.
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("EDITOR_API_URL")?,
            api_token: std::env::var("EDITOR_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                    .parse::<u64>()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration pointing at `api_base_url` with defaults for everything else.
    pub fn for_base_url(api_base_url: impl Into<String>) -> Self {
        Config {
            api_base_url: api_base_url.into(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rust_log: "info".to_string(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

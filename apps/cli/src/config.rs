use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
/// Every variable has a default, so a bare invocation works against a local
/// service instance.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: std::env::var("VELLUM_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            timeout_secs: std::env::var("VELLUM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("VELLUM_TIMEOUT_SECS must be a number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

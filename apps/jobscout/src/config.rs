use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub rapidapi_key: String,
    pub jsearch_base_url: String,
    pub jsearch_host: String,
    pub jsearch_num_pages: u32,
    pub http_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rapidapi_key: require_env("RAPIDAPI_KEY")?,
            jsearch_base_url: env_or("JSEARCH_BASE_URL", "https://jsearch.p.rapidapi.com".to_string())?,
            jsearch_host: env_or("JSEARCH_HOST", "jsearch.p.rapidapi.com".to_string())?,
            jsearch_num_pages: env_or("JSEARCH_NUM_PAGES", 2)?,
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", 30)?,
            port: env_or("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info".to_string())?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads and parses an optional variable, using `default` when it is unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

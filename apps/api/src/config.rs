use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Shared secret for the admin screen. Not a security boundary.
    pub admin_password: String,
    /// Simulated round-trip latency of the content store.
    pub store_latency: Duration,
    /// Sessions untouched for this long are evicted.
    pub session_ttl: Duration,
    /// Language every gateway answer is requested in.
    pub response_language: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            admin_password: optional_env("ADMIN_PASSWORD", "1234"),
            store_latency: Duration::from_millis(
                optional_env("STORE_LATENCY_MS", "300")
                    .parse::<u64>()
                    .context("STORE_LATENCY_MS must be a number of milliseconds")?,
            ),
            session_ttl: Duration::from_secs(
                optional_env("SESSION_TTL_SECS", "3600")
                    .parse::<u64>()
                    .context("SESSION_TTL_SECS must be a number of seconds")?,
            ),
            response_language: optional_env("RESPONSE_LANGUAGE", "Korean"),
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

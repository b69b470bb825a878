//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_BACKEND_URL` - Base URL of the remote storefront API
//!
//! ## Optional
//! - `SHOPFRONT_CURRENCY` - Display currency symbol (default: empty)
//! - `SHOPFRONT_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: none)
//! - `SENTRY_DSN` - Sentry error tracking DSN (used by binaries)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote API
    pub backend_url: Url,
    /// Currency symbol prepended to displayed prices
    pub currency: String,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl ClientConfig {
    /// Create a configuration for a backend URL with default settings.
    #[must_use]
    pub const fn new(backend_url: Url) -> Self {
        Self {
            backend_url,
            currency: String::new(),
            request_timeout: None,
            sentry_dsn: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = get_required_env(&lookup, "SHOPFRONT_BACKEND_URL")?;
        let backend_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFRONT_BACKEND_URL".to_string(), e.to_string())
        })?;

        let currency = get_env_or_default(&lookup, "SHOPFRONT_CURRENCY", "");

        let request_timeout = get_optional_env(&lookup, "SHOPFRONT_REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SHOPFRONT_REQUEST_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        let sentry_dsn = get_optional_env(&lookup, "SENTRY_DSN").filter(|dsn| !dsn.is_empty());

        Ok(Self {
            backend_url,
            currency,
            request_timeout,
            sentry_dsn,
        })
    }
}

/// Get a required variable from the lookup source.
fn get_required_env(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional variable from the lookup source.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
}

/// Get a variable with a default value.
fn get_env_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

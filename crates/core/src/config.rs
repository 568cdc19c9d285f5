use std::time::Duration;

use crate::errors::CoreError;

/// Backend used when nothing else is configured (local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "STRATOS_API_URL";

/// Environment variable holding an optional request timeout, in seconds.
pub const API_TIMEOUT_ENV: &str = "STRATOS_API_TIMEOUT_SECS";

/// Connection settings for the backend API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash (e.g., "http://localhost:8000").
    pub base_url: String,

    /// Per-request timeout. `None` keeps the transport default, which means
    /// a hung request stays pending until the connection gives up.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    /// Build a config for an explicit base URL.
    pub fn with_base_url(base_url: impl AsRef<str>) -> Result<Self, CoreError> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            timeout: None,
        })
    }

    /// Read `STRATOS_API_URL` and `STRATOS_API_TIMEOUT_SECS`, falling back to
    /// the local development endpoint.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            Some(url) => Self::with_base_url(url)?,
            None => Self::default(),
        };

        if let Some(raw) = lookup(API_TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("{API_TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set a request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn normalize_base_url(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| CoreError::Config(format!("Invalid API URL '{trimmed}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(CoreError::Config(format!(
            "Unsupported API URL scheme '{other}' (expected http or https)"
        ))),
    }
}

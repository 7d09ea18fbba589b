//! Environment-driven client configuration

use std::time::Duration;
use thiserror::Error;

use crate::api::librato::LibratoClient;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Credentials and endpoint for the Librato API
#[derive(Debug, Clone)]
pub struct LibratoConfig {
    pub user: String,
    pub token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl LibratoConfig {
    /// Load from `LIBRATO_USER`, `LIBRATO_TOKEN`, `LIBRATO_BASE_URL` and `LIBRATO_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        // A zero timeout would fail every request
        let timeout = match lookup("LIBRATO_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "LIBRATO_TIMEOUT_SECS",
                    value: raw.clone(),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            user: required("LIBRATO_USER")?,
            token: required("LIBRATO_TOKEN")?,
            base_url: lookup("LIBRATO_BASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| LibratoClient::DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout),
        })
    }
}

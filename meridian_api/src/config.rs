use std::time::Duration;

use anyhow::Context;

pub const BIND_ADDR_ENV_VAR: &str = "MERIDIAN_BIND_ADDR";
pub const REQUEST_TIMEOUT_ENV_VAR: &str = "MERIDIAN_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    /// Deadline given to every upstream-backed request.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let request_timeout = match std::env::var(REQUEST_TIMEOUT_ENV_VAR) {
            Ok(value) => Duration::from_secs(
                value
                    .parse()
                    .with_context(|| format!("{REQUEST_TIMEOUT_ENV_VAR}={value}"))?,
            ),
            Err(_) => defaults.request_timeout,
        };

        Ok(Self {
            bind_addr: std::env::var(BIND_ADDR_ENV_VAR).unwrap_or(defaults.bind_addr),
            request_timeout,
        })
    }
}

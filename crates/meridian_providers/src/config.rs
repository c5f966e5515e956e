use std::time::Duration;

use thiserror::Error;

pub const ORS_URL_ENV_VAR: &str = "MERIDIAN_ORS_URL";
pub const ORS_API_KEY_ENV_VAR: &str = "MERIDIAN_ORS_API_KEY";
pub const ROADS_URL_ENV_VAR: &str = "MERIDIAN_ROADS_URL";
pub const ROADS_API_KEY_ENV_VAR: &str = "MERIDIAN_ROADS_API_KEY";
pub const NOMINATIM_URL_ENV_VAR: &str = "MERIDIAN_NOMINATIM_URL";
pub const USER_AGENT_ENV_VAR: &str = "MERIDIAN_USER_AGENT";
pub const HTTP_TIMEOUT_ENV_VAR: &str = "MERIDIAN_HTTP_TIMEOUT_SECS";

pub const DEFAULT_ORS_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_ROADS_URL: &str = "https://roads.googleapis.com";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {var} has an invalid value: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Endpoints and credentials of every upstream provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub ors_url: String,
    pub ors_api_key: String,
    pub roads_url: String,
    pub roads_api_key: String,
    pub nominatim_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            ors_url: DEFAULT_ORS_URL.to_owned(),
            ors_api_key: String::new(),
            roads_url: DEFAULT_ROADS_URL.to_owned(),
            roads_api_key: String::new(),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_owned(),
            user_agent: format!("meridian/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(15),
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout = match std::env::var(HTTP_TIMEOUT_ENV_VAR) {
            Ok(value) => Duration::from_secs(value.parse().map_err(|_| {
                ConfigError::InvalidValue {
                    var: HTTP_TIMEOUT_ENV_VAR,
                    value: value.clone(),
                }
            })?),
            Err(_) => defaults.timeout,
        };

        Ok(Self {
            ors_url: std::env::var(ORS_URL_ENV_VAR).unwrap_or(defaults.ors_url),
            ors_api_key: std::env::var(ORS_API_KEY_ENV_VAR).unwrap_or(defaults.ors_api_key),
            roads_url: std::env::var(ROADS_URL_ENV_VAR).unwrap_or(defaults.roads_url),
            roads_api_key: std::env::var(ROADS_API_KEY_ENV_VAR).unwrap_or(defaults.roads_api_key),
            nominatim_url: std::env::var(NOMINATIM_URL_ENV_VAR).unwrap_or(defaults.nominatim_url),
            user_agent: std::env::var(USER_AGENT_ENV_VAR).unwrap_or(defaults.user_agent),
            timeout,
        })
    }
}

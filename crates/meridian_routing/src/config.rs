use std::{str::FromStr, time::Duration};

use jiff::tz::TimeZone;
use thiserror::Error;

use crate::{cache::CacheConfig, fallback::FallbackModel};

pub const CACHE_TTL_ENV_VAR: &str = "MERIDIAN_CACHE_TTL_SECS";
pub const CACHE_MAX_ENTRIES_ENV_VAR: &str = "MERIDIAN_CACHE_MAX_ENTRIES";
pub const CACHE_EVICTION_BATCH_ENV_VAR: &str = "MERIDIAN_CACHE_EVICTION_BATCH";
pub const SNAP_SAMPLE_SIZE_ENV_VAR: &str = "MERIDIAN_SNAP_SAMPLE_SIZE";
pub const TIMEZONE_ENV_VAR: &str = "MERIDIAN_TIMEZONE";

pub const DEFAULT_SNAP_SAMPLE_SIZE: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {var} has an invalid value: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Unknown time zone {name}: {source}")]
    TimeZone { name: String, source: jiff::Error },
}

fn parse_env<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(None),
    }
}

impl CacheConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            ttl: parse_env::<u64>(CACHE_TTL_ENV_VAR)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.ttl),
            max_entries: parse_env(CACHE_MAX_ENTRIES_ENV_VAR)?.unwrap_or(defaults.max_entries),
            eviction_batch: parse_env(CACHE_EVICTION_BATCH_ENV_VAR)?
                .unwrap_or(defaults.eviction_batch),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Upper bound on geometry points forwarded to the road snapper.
    pub snap_sample_size: usize,
    /// Zone in which departure hours are read for the traffic estimate.
    pub time_zone: TimeZone,
    pub fallback: FallbackModel,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            snap_sample_size: DEFAULT_SNAP_SAMPLE_SIZE,
            time_zone: TimeZone::system(),
            fallback: FallbackModel::default(),
        }
    }
}

impl AggregatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let time_zone = match std::env::var(TIMEZONE_ENV_VAR) {
            Ok(name) => TimeZone::get(&name).map_err(|source| ConfigError::TimeZone { name, source })?,
            Err(_) => defaults.time_zone,
        };

        Ok(Self {
            snap_sample_size: parse_env(SNAP_SAMPLE_SIZE_ENV_VAR)?
                .unwrap_or(defaults.snap_sample_size),
            time_zone,
            fallback: defaults.fallback,
        })
    }
}

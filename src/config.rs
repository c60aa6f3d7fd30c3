//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::application::order_service::DEFAULT_QUOTE_TTL_MINUTES;

/// Longest quote lifetime accepted from configuration: one week.
pub const MAX_QUOTE_TTL_MINUTES: i64 = 7 * 24 * 60;
/// Longest background sweep period accepted from configuration: one day.
pub const MAX_QUOTE_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Server configuration.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default `0.0.0.0`)
/// - `PORT`: listen port (default `3000`)
/// - `QUOTE_TTL_MINUTES`: how long a quote can be finalized (default `30`)
/// - `QUOTE_SWEEP_INTERVAL_SECS`: when set, expired quotes are also purged
///   in the background at this interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub quote_ttl_minutes: i64,
    pub quote_sweep_interval: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let quote_ttl_minutes =
            parse_or(&lookup, "QUOTE_TTL_MINUTES", defaults.quote_ttl_minutes)?;
        check_range("QUOTE_TTL_MINUTES", quote_ttl_minutes, MAX_QUOTE_TTL_MINUTES)?;

        let quote_sweep_interval = lookup("QUOTE_SWEEP_INTERVAL_SECS")
            .map(|raw| parse::<i64>("QUOTE_SWEEP_INTERVAL_SECS", raw))
            .transpose()?
            .map(|secs| {
                check_range(
                    "QUOTE_SWEEP_INTERVAL_SECS",
                    secs,
                    MAX_QUOTE_SWEEP_INTERVAL_SECS as i64,
                )
                .map(|()| Duration::from_secs(secs.unsigned_abs()))
            })
            .transpose()?;

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            quote_ttl_minutes,
            quote_sweep_interval,
        })
    }

    pub fn quote_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.quote_ttl_minutes)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            quote_ttl_minutes: DEFAULT_QUOTE_TTL_MINUTES,
            quote_sweep_interval: None,
        }
    }
}

fn parse<T: FromStr>(name: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value: raw })
}

fn check_range(name: &'static str, value: i64, max: i64) -> Result<(), ConfigError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min: 1,
            max,
        })
    }
}

fn parse_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name).map_or(Ok(default), |raw| parse(name, raw))
}

//! # Configuration
//!
//! Runtime settings are read from environment variables. `main` loads a
//! `.env` file first (via `dotenvy`), so either source works.
//!
//! ## Environment Variables
//!
//! - `BIND_ADDR` - Socket address to listen on (default [`DEFAULT_BIND_ADDR`])
//! - `LOG_FORMAT` - `pretty` or `json` (default `pretty`)
//! - `LOG_BODY_LIMIT` - Max bytes buffered per body for logging
//!   (default [`DEFAULT_LOG_BODY_LIMIT`])

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::utils::constant::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for `{key}`: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, colored output for development.
    #[default]
    Pretty,
    /// Bunyan-style JSON lines for log aggregation.
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub log_body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8090)),
            log_format: LogFormat::default(),
            log_body_limit: DEFAULT_LOG_BODY_LIMIT,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unset keys take their defaults; set but unparsable keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LOG_FORMAT",
                value,
            })?,
            None => LogFormat::default(),
        };
        let log_body_limit = match lookup("LOG_BODY_LIMIT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LOG_BODY_LIMIT",
                value,
            })?,
            None => DEFAULT_LOG_BODY_LIMIT,
        };

        Ok(Self {
            bind_addr,
            log_format,
            log_body_limit,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("LOG_FORMAT", "JSON"),
            ("LOG_BODY_LIMIT", "128"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_body_limit, 128);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup_from(&[("LOG_BODY_LIMIT", "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "LOG_BODY_LIMIT",
                value: "lots".to_string()
            }
        );

        let err = Config::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(err.to_string().contains("LOG_FORMAT"));

        assert!(Config::from_lookup(lookup_from(&[("BIND_ADDR", "nowhere")])).is_err());
    }
}

//! Service configuration read from the environment
//!
//! Every variable is optional. A `.env` file is loaded by the binary before
//! `AppConfig::from_env` runs.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

use patient_monitor_domain::{GeneratorSettings, SessionSettings};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_PATIENT_COUNT: usize = 100;
pub const DEFAULT_DATA_SEED: u64 = 42;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;
pub const DEFAULT_SESSION_MAX: usize = 1000;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings of the running service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,

    /// Reported by the health endpoint
    pub environment: String,

    /// Rows generated for each new session
    pub patient_count: usize,

    pub data_seed: u64,

    /// Idle time after which a session and its table are discarded
    pub session_ttl: Duration,

    pub session_max: usize,

    /// Allowed CORS origin; any origin when unset
    pub cors_allow_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            patient_count: DEFAULT_PATIENT_COUNT,
            data_seed: DEFAULT_DATA_SEED,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            session_max: DEFAULT_SESSION_MAX,
            cors_allow_origin: None,
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;
        let environment = lookup("APP_ENV")
            .map(|env| env.trim().to_string())
            .filter(|env| !env.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let patient_count = parse_var(&lookup, "PATIENT_COUNT", DEFAULT_PATIENT_COUNT)?;
        let data_seed = parse_var(&lookup, "DATA_SEED", DEFAULT_DATA_SEED)?;
        let ttl_secs = parse_var(&lookup, "SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;
        let session_max = parse_var(&lookup, "SESSION_MAX", DEFAULT_SESSION_MAX)?;

        if session_max == 0 {
            return Err(ConfigError::InvalidValue {
                name: "SESSION_MAX",
                value: "0".to_string(),
                reason: "at least one session must fit".to_string(),
            });
        }

        let cors_allow_origin = match lookup("CORS_ALLOW_ORIGIN") {
            Some(origin) if !origin.trim().is_empty() => {
                let origin = origin.trim().to_string();
                HeaderValue::from_str(&origin).map_err(|e| ConfigError::InvalidValue {
                    name: "CORS_ALLOW_ORIGIN",
                    value: origin.clone(),
                    reason: e.to_string(),
                })?;
                Some(origin)
            }
            _ => None,
        };

        Ok(Self {
            port,
            environment,
            patient_count,
            data_seed,
            session_ttl: Duration::from_secs(ttl_secs),
            session_max,
            cors_allow_origin,
        })
    }

    /// Session store settings derived from this configuration
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            idle_ttl: self.session_ttl,
            max_sessions: self.session_max,
            generator: GeneratorSettings {
                patient_count: self.patient_count,
                seed: self.data_seed,
            },
        }
    }
}

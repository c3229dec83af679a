//! Runtime configuration loaded from environment variables.
//!
//! Every value has a default in [`crate::global_variables`], so both binaries
//! start with no environment at all.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::global_variables::{
    DEFAULT_BIND_ADDR, DEFAULT_LIGHT_MAX_INTERVAL_MS, DEFAULT_LIGHT_MIN_INTERVAL_MS,
    DEFAULT_SERVER_URL, ENV_BIND_ADDR, ENV_JOURNAL_PATH, ENV_LIGHT_MAX_INTERVAL_MS,
    ENV_LIGHT_MIN_INTERVAL_MS, ENV_SERVER_URL,
};

/// Configuration of the traffic light server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub light_min_interval: Duration,
    pub light_max_interval: Duration,
    /// CSV journal of pass attempts. `None` disables it.
    pub journal_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load from the process environment.
    ///
    /// - `TRAFFIC_LIGHT_ADDR` -- bind address (default `127.0.0.1:5000`)
    /// - `LIGHT_MIN_INTERVAL_MS` / `LIGHT_MAX_INTERVAL_MS` -- light timer range
    /// - `TRAFFIC_JOURNAL` -- optional journal path
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load using `lookup` in place of the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let bind_addr: SocketAddr = parse_var(&lookup, ENV_BIND_ADDR, DEFAULT_BIND_ADDR)?;
        let min_ms: u64 = parse_var(
            &lookup,
            ENV_LIGHT_MIN_INTERVAL_MS,
            &DEFAULT_LIGHT_MIN_INTERVAL_MS.to_string(),
        )?;
        let max_ms: u64 = parse_var(
            &lookup,
            ENV_LIGHT_MAX_INTERVAL_MS,
            &DEFAULT_LIGHT_MAX_INTERVAL_MS.to_string(),
        )?;
        if min_ms == 0 || min_ms > max_ms {
            return Err(ConfigError::InvalidLightInterval { min_ms, max_ms });
        }
        let journal_path = lookup(ENV_JOURNAL_PATH)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            light_min_interval: Duration::from_millis(min_ms),
            light_max_interval: Duration::from_millis(max_ms),
            journal_path,
        })
    }
}

/// Configuration of a car client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarConfig {
    /// Base URL of the traffic light server.
    pub server_url: String,
}

impl CarConfig {
    /// Load from the process environment (`TRAFFIC_LIGHT_URL`).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let server_url = lookup(ENV_SERVER_URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }
}

// Parse `name` if set, otherwise `default`.
fn parse_var<F, T>(lookup: &F, name: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::InvalidValue {
        name,
        reason: e.to_string(),
        value,
    })
}

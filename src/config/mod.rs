//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `QIG_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CANDIDATE_CAPACITY, DEFAULT_CHUNK_DELAY_MS, DEFAULT_CHUNK_SIZE,
    DEFAULT_EVENT_LOG_CAPACITY,
};
use crate::search::{EvaluatorSettings, SearchSettings};
use crate::targets::validate_address;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `QIG_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Initial target addresses. Empty means the built-in default target.
    pub target_addresses: Vec<String>,

    /// Phrases per search chunk. Default: `10`.
    pub chunk_size: usize,

    /// Pause between search chunks in milliseconds. Default: `100`.
    pub chunk_delay_ms: u64,

    /// Per-derivation budget in milliseconds. Unset waits indefinitely.
    pub derive_timeout_ms: Option<u64>,

    /// Max retained high-Φ candidates. Default: `100`.
    pub candidate_capacity: usize,

    /// Max retained session events. Default: `500`.
    pub event_log_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            target_addresses: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay_ms: DEFAULT_CHUNK_DELAY_MS,
            derive_timeout_ms: None,
            candidate_capacity: DEFAULT_CANDIDATE_CAPACITY,
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "QIG_PORT";
    const ENV_BIND_ADDR: &'static str = "QIG_BIND_ADDR";
    const ENV_TARGET_ADDRESSES: &'static str = "QIG_TARGET_ADDRESSES";
    const ENV_CHUNK_SIZE: &'static str = "QIG_CHUNK_SIZE";
    const ENV_CHUNK_DELAY_MS: &'static str = "QIG_CHUNK_DELAY_MS";
    const ENV_DERIVE_TIMEOUT_MS: &'static str = "QIG_DERIVE_TIMEOUT_MS";
    const ENV_CANDIDATE_CAPACITY: &'static str = "QIG_CANDIDATE_CAPACITY";
    const ENV_EVENT_LOG_CAPACITY: &'static str = "QIG_EVENT_LOG_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let target_addresses = Self::parse_list_from_env(Self::ENV_TARGET_ADDRESSES);
        let chunk_size = Self::parse_number_from_env(Self::ENV_CHUNK_SIZE, defaults.chunk_size)?;
        let chunk_delay_ms =
            Self::parse_number_from_env(Self::ENV_CHUNK_DELAY_MS, defaults.chunk_delay_ms)?;
        let derive_timeout_ms = Self::parse_optional_number_from_env(Self::ENV_DERIVE_TIMEOUT_MS)?;
        let candidate_capacity =
            Self::parse_number_from_env(Self::ENV_CANDIDATE_CAPACITY, defaults.candidate_capacity)?;
        let event_log_capacity =
            Self::parse_number_from_env(Self::ENV_EVENT_LOG_CAPACITY, defaults.event_log_capacity)?;

        Ok(Self {
            port,
            bind_addr,
            target_addresses,
            chunk_size,
            chunk_delay_ms,
            derive_timeout_ms,
            candidate_capacity,
            event_log_capacity,
        })
    }

    /// Validates sizes and target addresses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_CHUNK_SIZE,
            });
        }
        if self.candidate_capacity == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_CANDIDATE_CAPACITY,
            });
        }
        if self.event_log_capacity == 0 {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_EVENT_LOG_CAPACITY,
            });
        }
        if self.derive_timeout_ms == Some(0) {
            return Err(ConfigError::MustBePositive {
                name: Self::ENV_DERIVE_TIMEOUT_MS,
            });
        }

        for address in &self.target_addresses {
            validate_address(address).map_err(|source| ConfigError::InvalidTarget {
                address: address.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            chunk_size: self.chunk_size,
            chunk_delay: Duration::from_millis(self.chunk_delay_ms),
            event_log_capacity: self.event_log_capacity,
        }
    }

    pub fn evaluator_settings(&self) -> EvaluatorSettings {
        EvaluatorSettings {
            derive_timeout: self.derive_timeout_ms.map(Duration::from_millis),
            ..EvaluatorSettings::default()
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_list_from_env(var_name: &str) -> Vec<String> {
        env::var(var_name)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        Ok(Self::parse_optional_number_from_env(var_name)?.unwrap_or(default))
    }

    fn parse_optional_number_from_env<T>(var_name: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        match env::var(var_name) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::NumberParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(None),
        }
    }
}

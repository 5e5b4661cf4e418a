//! Configuration error types.

use thiserror::Error;

use crate::targets::TargetError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric setting could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    NumberParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A size or budget that must be greater than zero was zero.
    #[error("{name} must be greater than zero")]
    MustBePositive { name: &'static str },

    /// A configured target address failed structural validation.
    #[error("invalid target address '{address}': {source}")]
    InvalidTarget {
        address: String,
        #[source]
        source: TargetError,
    },
}

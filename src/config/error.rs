//! Configuration error types

use thiserror::Error;

/// Failure to load or accept the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("configuration rejected: {0}")]
    Invalid(#[from] ValidationError),
}

/// A configuration value that loaded but cannot be used
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("port must be non-zero")]
    InvalidPort,

    #[error("host is not an IP address: {0}")]
    InvalidAddress(String),

    #[error("CORS origin needs an http(s) scheme: {0}")]
    InvalidCorsOrigin(String),

    #[error("timeout out of range")]
    InvalidTimeout,

    #[error("temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("max_output_tokens must be positive")]
    InvalidTokenLimit,

    #[error("engine setting out of range: {0}")]
    InvalidEngineSetting(&'static str),
}

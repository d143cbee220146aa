//! Reliability error types

use thiserror::Error;

/// Errors that can occur while configuring the assessor
#[derive(Error, Debug)]
pub enum ReliabilityError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

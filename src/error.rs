//! Error types for the CLI.

use thiserror::Error;

/// Primary error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Request could not be sent or its body could not be read.
    #[error(transparent)]
    NetworkError(#[from] reqwest::Error),

    /// Response body is not the JSON shape of an address.
    #[error("Invalid response from lookup service: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Terminal handling error.
    #[error("Terminal error: {0}")]
    TerminalError(#[from] std::io::Error),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results using CliError.
pub type Result<T> = std::result::Result<T, CliError>;

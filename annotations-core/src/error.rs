//! Common error types for the annotations service

use thiserror::Error;

/// Common result type for annotations operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the annotations crates
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied a lifecycle name outside the fixed table
    #[error("invalid lifecycle value: {0}")]
    InvalidLifecycle(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Error types for the analytics service

use std::io;

use thiserror::Error;

/// Result type alias for the analytics service
pub type Result<T> = std::result::Result<T, Error>;

/// Process-level errors (startup and configuration)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

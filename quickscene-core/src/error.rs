//! Error types for quickscene

use thiserror::Error;

/// Main error type for quickscene operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type alias for quickscene operations
pub type Result<T> = std::result::Result<T, Error>;

//! Shared error type

use thiserror::Error;

/// Errors raised by the shared logic
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result alias for the shared crate
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the riven tracker.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the riven tracker.
///
/// A rejected auction is not an error; it is reported through
/// projection results. `InvalidInput` is reserved for input that is
/// structurally unusable as a whole.
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not a sequence of auction mappings.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching from the marketplace failed.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Embedded page state could not be located.
    #[error("Extract error: {0}")]
    Extract(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a fetch error.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Error::Fetch(msg.into())
    }

    /// Create an extract error.
    pub fn extract(msg: impl Into<String>) -> Self {
        Error::Extract(msg.into())
    }

    /// Is this the fatal-class input error?
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

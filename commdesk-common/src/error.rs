//! Common error types for CommDesk

use thiserror::Error;

/// Common result type for CommDesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across CommDesk crates
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error talking to the hosted platform (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input, caught before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed import file content; terminal for the import attempt
    #[error("Parse error: {0}")]
    Parse(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Acting identity lacks the required role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The hosted platform rejected a request
    #[error("Platform error ({status}): {message}")]
    Platform { status: u16, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

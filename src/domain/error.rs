//! Error types for catalog browsing.
//!
//! This module defines the centralized error type [`BrowseError`] and a type alias
//! [`Result`] used throughout the crate. Errors raised by the remote API never reach
//! the rendering layer directly: controllers convert them into a generic,
//! user-facing failure message and keep the raw error for diagnostics only.

use thiserror::Error;

/// The main error type for catalog browsing operations.
///
/// Transport-level variants (`Request`, `Http`, `Decode`) originate in the remote
/// API client. Configuration variants originate while loading settings.
///
/// # Examples
///
/// ```
/// use catalog_browser::BrowseError;
///
/// let err = BrowseError::Http { status: 503, body: "busy".to_string() };
/// assert_eq!(err.to_string(), "HTTP 503: busy");
/// ```
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The request could not be sent or no response was received.
    #[error("Request failed: {0}")]
    Request(String),

    /// The remote API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl From<reqwest::Error> for BrowseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// A specialized `Result` type for catalog browsing operations.
pub type Result<T> = std::result::Result<T, BrowseError>;

//! Error types for talking to the monitor server and parsing its output.

use thiserror::Error;

/// Why a metrics (or config) request produced no usable payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP error: {0}")]
    Status(u16),

    /// Body was not the expected JSON shape.
    #[error("invalid payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(s) => FetchError::Status(s.as_u16()),
            None => FetchError::Transport(e.to_string()),
        }
    }
}

/// A log line that doesn't follow `YYYY-MM-DD HH:MM:SS [LEVEL] message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized log line: {0:?}")]
pub struct ParseError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("profile store error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

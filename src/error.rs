//! Error types for PagerDuty API calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the client.
///
/// A 404 on get/update operations is not an error; those operations return
/// `Ok(None)` instead so callers can tell "does not exist" apart from
/// "call failed".
#[derive(Debug, Error)]
pub enum Error {
    /// Network or connection failure, propagated unmodified from the
    /// underlying HTTP client. Not retried at this layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status code outside the operation's
    /// expected set. Carries the raw body for diagnostics.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid client configuration (base URL or token).
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    /// The HTTP status code, for [`Error::Status`] failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error taxonomy for the client.

use thiserror::Error;

/// Errors raised by the client.
///
/// Only the dispatcher retries, and only errors for which
/// [`Error::is_transient`] is true. Every other layer propagates the error
/// exactly as raised.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid credential: {0}")]
    InvalidCredential(&'static str),

    #[error("Invalid request path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: API token missing or rejected")]
    Unauthorized,

    #[error("Request rejected with {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("Unknown {kind} value: {value:?}")]
    UnknownEnumValue { kind: &'static str, value: String },

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

impl Error {
    /// Whether another attempt of the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Server { .. })
    }

    /// Whether the server reported the resource as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Error::UnknownEnumValue {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

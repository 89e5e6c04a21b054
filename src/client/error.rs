//! Client Error Types
//!
//! The executor never recovers from a failure itself. Each failure is
//! surfaced as one of these variants so callers (and tests) can tell a dead
//! network from a server-side refusal from a garbled success body.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The exchange never completed: connection refused, DNS failure,
    /// deadline elapsed, or the body stream broke.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `body` is the raw
    /// response text, untouched.
    #[error("HTTP error! status: {}, message: {body}", status.as_u16())]
    Application { status: StatusCode, body: String },

    /// A 2xx response whose body is not the expected JSON shape
    #[error("Decode failure: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// The body that failed to decode
        body: String,
    },

    /// The descriptor could not be turned into a request (bad URL,
    /// unserializable body). Raised before any network I/O.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// HTTP status of an application failure
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Application { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

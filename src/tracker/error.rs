//! Tracking-service error types.
//!
//! Every failure talking to the tracker is a downstream error: the webhook
//! path records it as an `error` outcome for the affected unit, and the
//! project API surfaces it as `502 Bad Gateway`. Nothing here is retried.

use thiserror::Error;

/// A failed tracker call.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("tracker request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The tracker answered with a non-2xx status.
    #[error("tracker returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The GraphQL response carried an `errors` array.
    #[error("tracker rejected the request: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// The response did not have the expected shape.
    #[error("malformed tracker response: {0}")]
    MalformedResponse(String),
}

impl TrackerError {
    /// Returns the HTTP status code, if the tracker sent one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TrackerError::Status { status, .. } => Some(*status),
            TrackerError::Transport(e) => e.status().map(|s| s.as_u16()),
            TrackerError::GraphQl { .. } | TrackerError::MalformedResponse(_) => None,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        TrackerError::MalformedResponse(message.into())
    }
}

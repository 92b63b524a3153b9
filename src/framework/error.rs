//! # Fetch Errors
//!
//! Every way a single GET can fail. The retry loop in [`fetch`](super::fetch)
//! treats all of them as retry-eligible and surfaces the last one once the
//! attempt budget is spent.

use std::time::Duration;

/// Errors produced by a [`Transport`](super::Transport) or by
/// [`fetch_resilient`](super::fetch_resilient).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FetchError {
    /// The attempt did not complete within the per-attempt budget.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection refused, DNS failure, reset, body read failure...
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. The body is kept so the
    /// caller can still read the error envelope.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// A response arrived but its body is not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout(_))
    }
}

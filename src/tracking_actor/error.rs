//! Error types for the tracking panel.
//!
//! Every failure the panel can show is one of these variants. `Display` is the
//! sentence the customer reads, so keep it specific and actionable.

use crate::framework::FetchError;
use crate::model::{LookupResult, OrderRecord, ValidationError};
use thiserror::Error;

/// Errors that can end a tracking attempt.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    /// The form input failed local checks. Nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Every attempt timed out.
    #[error("The tracking service took too long to respond. Please try again in a moment.")]
    Timeout,

    /// Every attempt failed for a non-timeout reason. The detail is for logs.
    #[error("We couldn't reach the tracking service. Please check your connection and try again.")]
    Transport(String),

    /// The server reported no matching order. Shown verbatim.
    #[error("{0}")]
    NotFound(String),

    /// Required configuration is missing, so lookups are disabled.
    #[error("Order tracking is unavailable right now ({0}). Please contact us for an update.")]
    Configuration(String),

    /// The tracking actor is no longer running.
    #[error("Tracking panel closed")]
    ActorClosed,

    /// The tracking actor dropped a response channel.
    #[error("Tracking panel dropped response channel")]
    ActorDropped,
}

impl TrackingError {
    /// `true` when the panel itself is gone, as opposed to a lookup outcome
    /// the panel has already rendered.
    pub fn is_actor_failure(&self) -> bool {
        matches!(self, TrackingError::ActorClosed | TrackingError::ActorDropped)
    }
}

impl From<FetchError> for TrackingError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Timeout(_) => TrackingError::Timeout,
            other => TrackingError::Transport(other.to_string()),
        }
    }
}

impl LookupResult {
    /// Splits a lookup outcome into the order or the error to display.
    pub fn into_result(self) -> Result<OrderRecord, TrackingError> {
        match self {
            LookupResult::Found(order) => Ok(order),
            LookupResult::NotFound { message } => Err(TrackingError::NotFound(message)),
            LookupResult::Invalid(e) => Err(TrackingError::Validation(e)),
            LookupResult::TransportFailure(e) => Err(e.into()),
        }
    }
}

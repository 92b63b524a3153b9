//! # Tracking Panel
//!
//! The order-status panel as an actor: one task owns the [`ViewState`],
//! requests arrive over a channel, lookups run in the background and report
//! back, and every state change is published for subscribers.
//!
//! ## Structure
//!
//! - [`actor`] - [`TrackingActor`] event loop and its [`TrackingRequest`] messages
//! - [`view`] - [`ViewState`], timeline and detail widgets
//! - [`animation`] - Glyph and embedded render modes
//! - [`error`] - [`TrackingError`], the user-visible failure taxonomy
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, client) = tracking_actor::new(Some(lookup_client), AnimationMode::Glyph);
//! tokio::spawn(actor.run());
//!
//! client.submit("AA-2024-0047", "").await?;
//! let state = client.wait_settled().await?;
//! println!("{state}");
//! ```

pub mod actor;
pub mod animation;
pub mod error;
pub mod view;

pub use actor::*;
pub use animation::*;
pub use error::*;
pub use view::*;

use crate::clients::{OrderLookupClient, TrackingClient};

/// Creates a new tracking actor and its client.
pub fn new(
    lookup: Option<OrderLookupClient>,
    animation: AnimationMode,
) -> (TrackingActor, TrackingClient) {
    TrackingActor::new(32, lookup, animation)
}

//! Typed clients: the order lookup endpoint and the tracking panel actor.

pub mod order_client;
pub mod tracking_client;

pub use order_client::*;
pub use tracking_client::*;

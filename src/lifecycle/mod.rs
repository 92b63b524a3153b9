//! Configuration, wiring and shutdown of the tracking system.

pub mod config;
pub mod tracing;
pub mod tracking_system;

pub use config::*;
pub use tracking_system::TrackingSystem;
pub use self::tracing::setup_tracing;

//! Resilient HTTP fetching.
//!
//! This module provides the transport layer every lookup goes through: a
//! swappable [`Transport`], the retry/timeout combinator [`fetch_resilient`]
//! and its [`RetryPolicy`].
//!
//! # Main Components
//!
//! - [`Transport`] - Trait for a single unretried GET
//! - [`HttpTransport`] - `reqwest`-backed production transport
//! - [`fetch_resilient`] - Per-attempt timeout, exponential backoff, bounded attempts
//! - [`FetchError`] - Timeout, transport and status failures
//!
//! # Testing
//!
//! See [`mock`] module for a scripted transport.

pub mod error;
pub mod fetch;
pub mod mock;
pub mod transport;

pub use error::FetchError;
pub use fetch::{fetch_resilient, RetryPolicy};
pub use transport::{HttpResponse, HttpTransport, Transport};

//! # Storefront Order Tracking
//!
//! > **The order-status panel of a print-on-demand storefront, as an actor.**
//!
//! A customer enters an order number (and, depending on configuration, the
//! email used at checkout). The panel asks a lookup endpoint for the order,
//! retrying with exponential backoff, then renders the status as an
//! eight-stage progress timeline with a short message, a longer description,
//! an animation and a details table.
//!
//! ## 🚀 Core Concepts
//!
//! ### One Owner for the View
//! The [`TrackingActor`](tracking_actor::TrackingActor) owns the
//! [`ViewState`](tracking_actor::ViewState). Form input, submissions, resets
//! and finished lookups all arrive as messages and are applied one at a time.
//! Subscribers receive whole states over a `watch` channel.
//!
//! ### Latest Submission Wins
//! Lookups run in background tasks. Each submission takes a sequence number
//! and only the completion carrying the latest one is rendered.
//!
//! ### Mocking the Network
//! The fetcher works against the [`Transport`](framework::Transport) trait.
//! [`MockTransport`](framework::mock::MockTransport) scripts responses,
//! failures and delays so retries and races can be tested with paused time.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Plumbing ([`framework`])
//! - **Role**: Transport trait, HTTP implementation, resilient fetch with
//!   timeout and backoff, mock transport.
//! - **Key items**: [`fetch_resilient`](framework::fetch_resilient),
//!   [`RetryPolicy`](framework::RetryPolicy).
//!
//! ### 2. The Vocabulary ([`model`])
//! - **Role**: Status labels and their descriptors, lookup requests and their
//!   validation, order records and lookup outcomes.
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: [`OrderLookupClient`](clients::OrderLookupClient) talks to the
//!   endpoint; [`TrackingClient`](clients::TrackingClient) talks to the actor.
//!
//! ### 4. The Panel ([`tracking_actor`])
//! - **Role**: Event loop, view widgets, animation modes, error taxonomy.
//!
//! ### 5. The Way In ([`entry`])
//! - **Role**: Deep links that pre-fill and auto-submit the form.
//!
//! ### 6. The Orchestrator ([`lifecycle`])
//! - **Role**: Configuration, wiring, shutdown and log setup.
//! - **Key items**: [`TrackingSystem`](lifecycle::TrackingSystem).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --endpoint https://proxy.example/track --order AA-2024-0047
//! ```

pub mod clients;
pub mod entry;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod tracking_actor;

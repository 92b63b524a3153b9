//! # Observability
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber for the binary.
//! Levels come from `RUST_LOG`.
//!
//! ```bash
//! # Lookup lifecycle only
//! RUST_LOG=info storefront-tracking --order AA-2024-0047
//!
//! # Every fetch attempt and backoff
//! RUST_LOG=debug storefront-tracking --order AA-2024-0047
//!
//! # Fetcher only
//! RUST_LOG=storefront_tracking::framework=debug storefront-tracking --order AA-2024-0047
//! ```
//!
//! A lookup that needed one retry reads like this at `debug`:
//!
//! ```text
//! INFO Submitted sequence=1 order_id="AA-2024-0047"
//! DEBUG Fetch attempt attempt=0 max_attempts=3
//! WARN Fetch attempt failed, backing off attempt=0 error=Request timed out after 10s delay=1s
//! DEBUG Fetch attempt attempt=1 max_attempts=3
//! INFO Fetch ok attempt=1 status=200
//! INFO Displayed sequence=1 status=Printing stage=Some(2)
//! ```
//!
//! Stale completions show up as `Discarding stale result` with both
//! sequence numbers.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

//! # Mock Transport
//!
//! Utilities for testing the fetcher, the lookup client and the tracking actor
//! without a network.
//!
//! [`MockTransport`] answers each GET with the next queued expectation, in
//! order. Queue expectations with the fluent builder returned by
//! [`MockTransport::expect_get`], run the code under test, then call
//! [`MockTransport::verify`] to assert every expectation was consumed.
//!
//! | Builder call | What the transport does |
//! |---|---|
//! | `return_json(value)` | 200 with `value` serialized as the body |
//! | `return_status(code, body)` | `code` with a raw body |
//! | `return_transport_error(msg)` | `Err(FetchError::Transport(msg))` |
//! | `return_timeout()` | never resolves, so the caller's timer fires |
//! | `return_after(delay, code, body)` | sleeps `delay`, then answers |
//!
//! ```rust,ignore
//! let mut mock = MockTransport::new();
//! mock.expect_get().return_status(503, "");
//! mock.expect_get().return_json(json!({ "success": true, "order": { .. } }));
//!
//! let response = fetch_resilient(&mock, &url, &RetryPolicy::default()).await?;
//! mock.verify();
//! ```
//!
//! Combine with `#[tokio::test(start_paused = true)]` so timeouts and backoff
//! complete instantly while keeping exact elapsed times.

use crate::framework::{FetchError, HttpResponse, Transport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Represents a queued answer to the next GET.
#[derive(Debug, Clone)]
enum Expectation {
    Respond(HttpResponse),
    Fail(FetchError),
    Hang,
    Delayed(Duration, HttpResponse),
}

/// A transport with expectation tracking for fluent testing.
///
/// Cloning shares the queue and the request log, so a clone can be handed to
/// the code under test while the original is kept for assertions.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<Url>>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `get` call.
    pub fn expect_get(&mut self) -> GetExpectationBuilder {
        GetExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Number of GETs received so far.
    pub fn attempts(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every URL requested, in order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(url.clone());
        let expectation = self.expectations.lock().unwrap().pop_front();

        match expectation {
            Some(Expectation::Respond(response)) => Ok(response),
            Some(Expectation::Fail(error)) => Err(error),
            Some(Expectation::Hang) => std::future::pending().await,
            Some(Expectation::Delayed(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            None => panic!("Unexpected request: {url}"),
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl GetExpectationBuilder {
    fn push(self, expectation: Expectation) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Answers 200 with `value` as the JSON body.
    pub fn return_json(self, value: serde_json::Value) {
        self.push(Expectation::Respond(HttpResponse::new(200, value.to_string())));
    }

    /// Answers with an arbitrary status and raw body.
    pub fn return_status(self, status: u16, body: impl Into<String>) {
        self.push(Expectation::Respond(HttpResponse::new(status, body)));
    }

    /// Fails the attempt with a transport error.
    pub fn return_transport_error(self, message: impl Into<String>) {
        self.push(Expectation::Fail(FetchError::Transport(message.into())));
    }

    /// Never answers.
    pub fn return_timeout(self) {
        self.push(Expectation::Hang);
    }

    /// Answers after `delay`.
    pub fn return_after(self, delay: Duration, status: u16, body: impl Into<String>) {
        self.push(Expectation::Delayed(delay, HttpResponse::new(status, body)));
    }
}

//! # Transport Seam
//!
//! The fetcher never talks to `reqwest` directly. It goes through the
//! [`Transport`] trait so tests can swap in [`MockTransport`](super::mock::MockTransport)
//! and drive timeouts and failures deterministically.

use crate::framework::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A raw HTTP response: status code plus the body read as text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for any 2xx status.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single, unretried HTTP GET.
///
/// Implementations must not retry or time out on their own; both concerns
/// belong to [`fetch_resilient`](super::fetch_resilient). A non-2xx status is
/// *not* an error at this level and comes back as `Ok(HttpResponse)`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        debug!(status, bytes = body.len(), "Response received");

        Ok(HttpResponse { status, body })
    }
}

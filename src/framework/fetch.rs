//! # Resilient Fetch
//!
//! Bounded-time GET with bounded retries and pure exponential backoff.
//!
//! ## Attempt Loop
//!
//! Each attempt races the transport call against `policy.timeout` using
//! [`tokio::time::timeout`]. When the timer wins, the in-flight future is
//! dropped, which cancels the request. That cancellation is scoped to the
//! attempt only; the next attempt starts from scratch.
//!
//! Between attempt `i` (0-indexed) and `i + 1` the loop waits
//! `base_backoff * 2^i`. With the default policy that is 1s, then 2s. The wait
//! is a [`tokio::time::sleep`], so other tasks keep running.
//!
//! ```text
//! attempt 0 ──fail──> sleep 1s ──> attempt 1 ──fail──> sleep 2s ──> attempt 2 ──fail──> Err(last)
//! ```

use crate::framework::{FetchError, HttpResponse, Transport};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Per-attempt timeout, attempt budget and backoff base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10_000),
            max_attempts: 3,
            base_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(timeout: Duration, max_attempts: u32) -> Self {
        Self {
            timeout,
            max_attempts,
            ..Self::default()
        }
    }

    /// Wait inserted after the failed attempt `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_backoff.saturating_mul(factor)
    }
}

/// Fetches `url`, retrying timeouts, transport errors and non-2xx statuses.
///
/// Returns the first 2xx response. After `policy.max_attempts` failures the
/// last failure is returned: [`FetchError::Timeout`], [`FetchError::Transport`]
/// or [`FetchError::Status`] carrying the final response body.
pub async fn fetch_resilient<T>(
    transport: &T,
    url: &Url,
    policy: &RetryPolicy,
) -> Result<HttpResponse, FetchError>
where
    T: Transport + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        debug!(attempt, max_attempts, "Fetch attempt");

        let outcome = match tokio::time::timeout(policy.timeout, transport.get(url)).await {
            Ok(Ok(response)) if response.is_ok() => {
                info!(attempt, status = response.status, "Fetch ok");
                return Ok(response);
            }
            Ok(Ok(response)) => FetchError::Status {
                status: response.status,
                body: response.body,
            },
            Ok(Err(e)) => e,
            Err(_) => FetchError::Timeout(policy.timeout),
        };

        attempt += 1;
        if attempt >= max_attempts {
            warn!(attempts = attempt, error = %outcome, "Fetch failed, attempts exhausted");
            return Err(outcome);
        }

        let delay = policy.delay_for_attempt(attempt - 1);
        warn!(attempt = attempt - 1, error = %outcome, ?delay, "Fetch attempt failed, backing off");
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use tokio::time::Instant;

    fn url() -> Url {
        Url::parse("https://proxy.example/track?orderId=AA-2024-0047").unwrap()
    }

    #[test]
    fn test_backoff_doubles_from_one_second() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::default();
        assert!(policy.delay_for_attempt(64) >= policy.delay_for_attempt(31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_returns_without_delay() {
        let mut mock = MockTransport::new();
        mock.expect_get().return_json(serde_json::json!({ "success": true }));

        let start = Instant::now();
        let response = fetch_resilient(&mock, &url(), &RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(start.elapsed(), Duration::ZERO);
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_failures_then_success_backs_off_one_then_two_seconds() {
        let mut mock = MockTransport::new();
        mock.expect_get().return_transport_error("connection reset");
        mock.expect_get().return_status(503, "");
        mock.expect_get().return_json(serde_json::json!({ "success": true }));

        let start = Instant::now();
        let response = fetch_resilient(&mock, &url(), &RetryPolicy::default())
            .await
            .unwrap();

        assert!(response.is_ok());
        assert_eq!(mock.attempts(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(3));
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_timing_out_makes_exactly_max_attempts() {
        let mut mock = MockTransport::new();
        for _ in 0..3 {
            mock.expect_get().return_timeout();
        }

        let start = Instant::now();
        let policy = RetryPolicy::new(Duration::from_millis(10_000), 3);
        let err = fetch_resilient(&mock, &url(), &policy).await.unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(mock.attempts(), 3);
        // three 10s timeouts plus the 1s and 2s backoffs
        assert_eq!(start.elapsed(), Duration::from_secs(33));
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_status_failure_keeps_last_body() {
        let mut mock = MockTransport::new();
        mock.expect_get().return_status(500, "boom");
        mock.expect_get().return_status(404, r#"{"success":false,"error":"nope"}"#);

        let policy = RetryPolicy::new(Duration::from_secs(10), 2);
        let err = fetch_resilient(&mock, &url(), &policy).await.unwrap_err();

        assert_eq!(
            err,
            FetchError::Status {
                status: 404,
                body: r#"{"success":false,"error":"nope"}"#.to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempt_budget_still_tries_once() {
        let mut mock = MockTransport::new();
        mock.expect_get().return_transport_error("refused");

        let policy = RetryPolicy::new(Duration::from_secs(1), 0);
        let err = fetch_resilient(&mock, &url(), &policy).await.unwrap_err();

        assert_eq!(err, FetchError::Transport("refused".to_string()));
        assert_eq!(mock.attempts(), 1);
    }
}

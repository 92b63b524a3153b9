//! # Deep Links
//!
//! Reads `order` and `email` from a navigation URL such as
//! `https://shop.example/?order=AA-2024-0047&email=jo@example.com#track` and
//! turns them into a pre-filled, auto-submitted tracking form.
//!
//! Parameters only count when the URL's fragment is the tracking route token.
//! Without an `order` parameter nothing is submitted, even if `email` is set.

use crate::clients::TrackingClient;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

/// Route token of the tracking view (`#track`).
pub const TRACKING_ROUTE: &str = "track";

/// Wait between pre-filling the form and submitting it.
pub const AUTO_SUBMIT_DELAY: Duration = Duration::from_millis(500);

/// Parameters read from a navigation URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLink {
    pub identifier: Option<String>,
    pub secondary_filter: Option<String>,
}

impl DeepLink {
    /// Extracts the link parameters, or `None` if `url` is not on `route`.
    ///
    /// Blank parameters count as absent. The first occurrence of a repeated
    /// parameter wins.
    pub fn from_url(url: &Url, route: &str) -> Option<Self> {
        let fragment = url.fragment().unwrap_or_default().trim_start_matches('/');
        if fragment != route {
            return None;
        }

        let mut link = DeepLink::default();
        for (key, value) in url.query_pairs() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "order" if link.identifier.is_none() => link.identifier = Some(value.to_string()),
                "email" if link.secondary_filter.is_none() => {
                    link.secondary_filter = Some(value.to_string())
                }
                _ => {}
            }
        }
        Some(link)
    }

    /// `true` when the link should trigger a lookup.
    pub fn should_submit(&self) -> bool {
        self.identifier.is_some()
    }
}

/// Clears the panel, pre-fills the form from `link` and, if it names an order,
/// schedules a submission after `delay`. A missing `email` leaves the field
/// blank rather than keeping an earlier value.
///
/// Returns the handle of the scheduled submission, if any.
pub async fn bind(
    link: &DeepLink,
    client: &TrackingClient,
    delay: Duration,
) -> Option<JoinHandle<()>> {
    let Some(identifier) = link.identifier.clone() else {
        debug!("Deep link without an order number, nothing to do");
        return None;
    };

    let secondary_filter = link.secondary_filter.clone().unwrap_or_default();
    let prefilled = async {
        client.reset().await?;
        client
            .prefill(Some(identifier.clone()), Some(secondary_filter))
            .await
    }
    .await;
    if let Err(e) = prefilled {
        warn!(error = %e, "Deep link prefill failed");
        return None;
    }

    info!(order_id = %identifier, ?delay, "Scheduling deep link lookup");
    let client = client.clone();
    Some(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = client.submit_form().await {
            debug!(error = %e, "Deep link submission did not start a lookup");
        }
    }))
}

//! # Order Lookup Client
//!
//! Validates form input, builds the lookup URL, delegates to
//! [`fetch_resilient`] and interprets the response envelope.
//!
//! No caching, and no retries beyond what the fetcher already does.
use crate::framework::{fetch_resilient, FetchError, HttpResponse, RetryPolicy, Transport};
use crate::model::{Envelope, LookupRequest, LookupResult, SecondaryFilterField};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Shown when the server gives no reason of its own.
pub const GENERIC_NOT_FOUND: &str =
    "We couldn't find that order. Please check your order number and email address.";

/// Title of the panel whenever a lookup ends in an error.
pub const ERROR_TITLE: &str = "We couldn't show this order";

/// Client for the order lookup endpoint.
#[derive(Clone)]
pub struct OrderLookupClient {
    transport: Arc<dyn Transport>,
    endpoint: Url,
    policy: RetryPolicy,
    field: SecondaryFilterField,
}

impl OrderLookupClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        endpoint: Url,
        policy: RetryPolicy,
        field: SecondaryFilterField,
    ) -> Self {
        Self {
            transport,
            endpoint,
            policy,
            field,
        }
    }

    pub fn secondary_filter_field(&self) -> SecondaryFilterField {
        self.field
    }

    /// `<endpoint>?orderId=..&secondaryFilter=..`, both values percent-encoded.
    pub fn request_url(&self, request: &LookupRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("orderId", request.identifier());
            if let Some(filter) = request.secondary_filter() {
                query.append_pair("secondaryFilter", filter);
            }
        }
        url
    }

    /// Validates raw input and, if it passes, performs the lookup.
    #[instrument(skip(self, secondary_filter))]
    pub async fn lookup(&self, identifier: &str, secondary_filter: &str) -> LookupResult {
        match LookupRequest::new(identifier, secondary_filter, self.field) {
            Ok(request) => self.lookup_request(&request).await,
            Err(e) => {
                debug!(error = %e, "Rejected before sending");
                LookupResult::Invalid(e)
            }
        }
    }

    /// Performs the lookup for an already validated request.
    #[instrument(skip(self, request), fields(order_id = request.identifier()))]
    pub async fn lookup_request(&self, request: &LookupRequest) -> LookupResult {
        let url = self.request_url(request);
        info!("Sending lookup");

        let result = interpret(fetch_resilient(self.transport.as_ref(), &url, &self.policy).await);
        match &result {
            LookupResult::Found(order) => info!(status = %order.status, "Order found"),
            LookupResult::NotFound { message } => info!(%message, "Order not found"),
            LookupResult::TransportFailure(e) => warn!(error = %e, "Lookup failed"),
            LookupResult::Invalid(_) => {}
        }
        result
    }
}

fn interpret(fetched: Result<HttpResponse, FetchError>) -> LookupResult {
    match fetched {
        Ok(response) => match serde_json::from_str::<Envelope>(&response.body) {
            Ok(Envelope {
                success: true,
                order: Some(order),
                ..
            }) => LookupResult::Found(order),
            Ok(Envelope { success: true, .. }) => LookupResult::TransportFailure(
                FetchError::Decode("success envelope without an order".to_string()),
            ),
            Ok(Envelope { error, .. }) => not_found(error),
            Err(e) => LookupResult::TransportFailure(FetchError::Decode(e.to_string())),
        },
        // Retries are spent; a 4xx is a definitive answer, a 5xx is not.
        Err(FetchError::Status { status, body }) if status < 500 => {
            let error = serde_json::from_str::<Envelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error);
            not_found(error)
        }
        Err(e) => LookupResult::TransportFailure(e),
    }
}

fn not_found(error: Option<String>) -> LookupResult {
    let message = error
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_NOT_FOUND.to_string());
    LookupResult::NotFound { message }
}

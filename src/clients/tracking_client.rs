//! # Tracking Client
//!
//! Typed handle to the [`TrackingActor`](crate::tracking_actor::TrackingActor).
//! It hides the request/response channels and exposes the published view.
use crate::tracking_actor::{Phase, TrackingError, TrackingRequest, ViewState};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Client for interacting with the tracking panel.
///
/// Cheap to clone; every clone talks to the same actor. The actor stops once
/// all clones are dropped.
#[derive(Clone)]
pub struct TrackingClient {
    sender: mpsc::Sender<TrackingRequest>,
    updates: watch::Receiver<ViewState>,
}

impl TrackingClient {
    pub fn new(sender: mpsc::Sender<TrackingRequest>, updates: watch::Receiver<ViewState>) -> Self {
        Self { sender, updates }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, TrackingError>>) -> TrackingRequest,
    ) -> Result<T, TrackingError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| TrackingError::ActorClosed)?;
        response.await.map_err(|_| TrackingError::ActorDropped)?
    }

    /// Fills in form fields without submitting. `None` leaves a field as is.
    #[instrument(skip(self, secondary_filter))]
    pub async fn prefill(
        &self,
        identifier: Option<String>,
        secondary_filter: Option<String>,
    ) -> Result<(), TrackingError> {
        debug!("Sending request");
        self.request(|respond_to| TrackingRequest::Prefill {
            identifier,
            secondary_filter,
            respond_to,
        })
        .await
    }

    /// Submits the form as currently filled in.
    ///
    /// Returns the submission's sequence number, or the validation or
    /// configuration error that stopped it before any network call. Either
    /// way the panel already shows the outcome.
    #[instrument(skip(self))]
    pub async fn submit_form(&self) -> Result<u64, TrackingError> {
        debug!("Sending request");
        self.request(|respond_to| TrackingRequest::SubmitForm { respond_to })
            .await
    }

    /// Fills in both fields and submits.
    pub async fn submit(
        &self,
        identifier: &str,
        secondary_filter: &str,
    ) -> Result<u64, TrackingError> {
        self.prefill(
            Some(identifier.to_string()),
            Some(secondary_filter.to_string()),
        )
        .await?;
        self.submit_form().await
    }

    /// Clears the panel and the form.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), TrackingError> {
        debug!("Sending request");
        self.request(|respond_to| TrackingRequest::Reset { respond_to })
            .await
    }

    /// Current panel state.
    pub async fn snapshot(&self) -> Result<ViewState, TrackingError> {
        self.request(|respond_to| TrackingRequest::Snapshot { respond_to })
            .await
    }

    /// A receiver that sees every published state.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.updates.clone()
    }

    /// Waits until the panel is no longer `Loading` and returns that state.
    pub async fn wait_settled(&self) -> Result<ViewState, TrackingError> {
        let mut updates = self.updates.clone();
        let state = updates
            .wait_for(|state| state.phase != Phase::Loading)
            .await
            .map_err(|_| TrackingError::ActorClosed)?;
        Ok(state.clone())
    }
}

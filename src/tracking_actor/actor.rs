//! # Tracking Actor
//!
//! The single owner of the tracking panel's [`ViewState`]. It processes
//! requests sequentially from an `mpsc` channel, so no locks guard the state.
//!
//! ## State Machine
//!
//! ```text
//!            submit (valid)            Found
//!   Idle ─────────────────> Loading ──────────> Displayed
//!     ^                       │  ^                  │
//!     │ reset                 │  └── submit ────────┤
//!     │                       │ NotFound / Invalid  │
//!     │                       v  / TransportFailure │
//!     └──────────────────── Error <─────────────────┘
//!                               submit (invalid)
//! ```
//!
//! ## Overlapping Submissions
//!
//! A new submission does not cancel a lookup already in flight. Instead every
//! submission (and every reset) takes the next sequence number, and a
//! completion is applied only if its sequence is still the latest. A slow
//! first response can never overwrite a faster second one.
//!
//! ## Publishing
//!
//! After every change the state is sent on a `watch` channel. Subscribers see
//! whole states, never partial renders.

use crate::clients::{OrderLookupClient, TrackingClient};
use crate::model::{LookupRequest, LookupResult, SecondaryFilterField};
use crate::tracking_actor::animation::AnimationMode;
use crate::tracking_actor::view::ViewState;
use crate::tracking_actor::TrackingError;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, TrackingError>>;

/// Messages accepted by the [`TrackingActor`].
#[derive(Debug)]
pub enum TrackingRequest {
    /// Fill in form fields. `None` leaves a field unchanged.
    Prefill {
        identifier: Option<String>,
        secondary_filter: Option<String>,
        respond_to: Response<()>,
    },
    /// Submit the form as it currently stands, like clicking "Track".
    /// Answers with the submission's sequence number.
    SubmitForm { respond_to: Response<u64> },
    /// Clear the panel and the form, back to `Idle`.
    Reset { respond_to: Response<()> },
    /// Current state.
    Snapshot { respond_to: Response<ViewState> },
}

/// A lookup that finished in a background task.
#[derive(Debug)]
struct Completion {
    sequence: u64,
    result: LookupResult,
}

/// The tracking panel controller.
pub struct TrackingActor {
    receiver: mpsc::Receiver<TrackingRequest>,
    completions_tx: mpsc::Sender<Completion>,
    completions_rx: mpsc::Receiver<Completion>,
    publisher: watch::Sender<ViewState>,
    state: ViewState,
    latest_sequence: u64,
    lookup: Option<OrderLookupClient>,
    animation: AnimationMode,
}

impl TrackingActor {
    /// Creates the actor and its client.
    ///
    /// `lookup` is `None` when no endpoint is configured; submissions then end
    /// in `Error` with a configuration message instead of failing the caller.
    pub fn new(
        buffer_size: usize,
        lookup: Option<OrderLookupClient>,
        animation: AnimationMode,
    ) -> (Self, TrackingClient) {
        let secondary_field = lookup
            .as_ref()
            .map(OrderLookupClient::secondary_filter_field)
            .unwrap_or(SecondaryFilterField::Optional);
        let state = ViewState::new(secondary_field);

        let (sender, receiver) = mpsc::channel(buffer_size);
        let (completions_tx, completions_rx) = mpsc::channel(buffer_size);
        let (publisher, updates) = watch::channel(state.clone());

        let actor = Self {
            receiver,
            completions_tx,
            completions_rx,
            publisher,
            state,
            latest_sequence: 0,
            lookup,
            animation,
        };
        (actor, TrackingClient::new(sender, updates))
    }

    /// Runs the event loop until every [`TrackingClient`] is dropped.
    pub async fn run(mut self) {
        info!(panel = "tracking", lookup_enabled = self.lookup.is_some(), "Actor started");

        loop {
            tokio::select! {
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else { break };
                    self.handle_request(msg);
                }
                Some(completion) = self.completions_rx.recv() => {
                    self.handle_completion(completion);
                }
            }
        }

        info!(panel = "tracking", last_sequence = self.latest_sequence, "Shutdown");
    }

    fn handle_request(&mut self, msg: TrackingRequest) {
        match msg {
            TrackingRequest::Prefill {
                identifier,
                secondary_filter,
                respond_to,
            } => {
                debug!(?identifier, has_secondary = secondary_filter.is_some(), "Prefill");
                if let Some(identifier) = identifier {
                    self.state.form.identifier = identifier;
                }
                if let Some(secondary_filter) = secondary_filter {
                    self.state.form.secondary_filter = secondary_filter;
                }
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
            TrackingRequest::SubmitForm { respond_to } => {
                let _ = respond_to.send(self.submit());
            }
            TrackingRequest::Reset { respond_to } => {
                self.latest_sequence += 1;
                self.state.reset();
                info!(sequence = self.latest_sequence, "Reset");
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
            TrackingRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.state.clone()));
            }
        }
    }

    fn submit(&mut self) -> Result<u64, TrackingError> {
        self.latest_sequence += 1;
        let sequence = self.latest_sequence;
        let form = &self.state.form;

        let request = LookupRequest::new(
            &form.identifier,
            &form.secondary_filter,
            form.secondary_field,
        )
        .map_err(TrackingError::from)
        .and_then(|request| match &self.lookup {
            Some(client) => Ok((request, client.clone())),
            None => Err(TrackingError::Configuration(
                "no lookup endpoint configured".to_string(),
            )),
        });

        let (request, client) = match request {
            Ok(ready) => ready,
            Err(e) => {
                warn!(sequence, error = %e, "Submission rejected");
                self.state.show_error(&e);
                self.state.sequence = sequence;
                self.publish();
                return Err(e);
            }
        };

        info!(sequence, order_id = request.identifier(), "Submitted");
        self.state.begin_loading(sequence);
        self.publish();

        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = client.lookup_request(&request).await;
            let _ = completions.send(Completion { sequence, result }).await;
        });

        Ok(sequence)
    }

    fn handle_completion(&mut self, completion: Completion) {
        let Completion { sequence, result } = completion;
        if sequence != self.latest_sequence {
            debug!(sequence, latest = self.latest_sequence, "Discarding stale result");
            return;
        }

        match result.into_result() {
            Ok(order) => {
                self.state.show_order(&order, &self.animation);
                info!(sequence, status = %order.status, stage = ?self.state.timeline.active_index(), "Displayed");
            }
            Err(e) => {
                self.state.show_error(&e);
                warn!(sequence, error = %e, "Lookup ended in error");
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

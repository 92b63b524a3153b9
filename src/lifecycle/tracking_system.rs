use crate::clients::{OrderLookupClient, TrackingClient};
use crate::entry::{bind, DeepLink};
use crate::framework::{HttpTransport, Transport};
use crate::lifecycle::TrackingConfig;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use url::Url;

/// The runtime orchestrator for the order tracking panel.
///
/// `TrackingSystem` is responsible for:
/// - **Dependency Wiring**: transport → lookup client → tracking actor
/// - **Lifecycle Management**: spawning the actor and stopping it on shutdown
/// - **Entry Binding**: applying deep links against the configured route
///
/// # Example
///
/// ```ignore
/// let system = TrackingSystem::new(config)?;
///
/// system.tracking_client.submit("AA-2024-0047", "").await?;
/// let state = system.tracking_client.wait_settled().await?;
///
/// system.shutdown().await?;
/// ```
pub struct TrackingSystem {
    /// Client for interacting with the tracking panel
    pub tracking_client: TrackingClient,

    config: TrackingConfig,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl TrackingSystem {
    /// Creates the system over a real HTTP transport.
    pub fn new(config: TrackingConfig) -> Result<Self, String> {
        let transport = HttpTransport::new().map_err(|e| e.to_string())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates the system over any transport. Tests pass a mock here.
    ///
    /// A missing endpoint does not fail construction: the panel starts and
    /// reports a configuration error on every submission.
    pub fn with_transport(config: TrackingConfig, transport: Arc<dyn Transport>) -> Self {
        let lookup = match &config.endpoint {
            Some(endpoint) => Some(OrderLookupClient::new(
                transport,
                endpoint.clone(),
                config.retry.clone(),
                config.secondary_filter,
            )),
            None => {
                warn!("No lookup endpoint configured, order tracking is disabled");
                None
            }
        };

        let (actor, tracking_client) = crate::tracking_actor::new(lookup, config.animation.clone());
        let handle = tokio::spawn(actor.run());

        Self {
            tracking_client,
            config,
            handle,
        }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Applies a navigation URL. Returns the scheduled submission, if the URL
    /// is on the tracking route and names an order.
    ///
    /// Leaving the tracking route resets the panel.
    pub async fn activate(&self, url: &Url) -> Option<JoinHandle<()>> {
        let Some(link) = DeepLink::from_url(url, &self.config.route_token) else {
            debug!(fragment = ?url.fragment(), "Navigated away from tracking view");
            if let Err(e) = self.tracking_client.reset().await {
                warn!(error = %e, "Panel reset failed");
            }
            return None;
        };
        bind(&link, &self.tracking_client, self.config.auto_submit_delay).await
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops the client, which closes the actor's channel, then waits for the
    /// actor task. Lookups still in flight are abandoned.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down tracking system...");
        drop(self.tracking_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Tracking system shutdown complete.");
        Ok(())
    }
}

//! # Storefront Tracking CLI
//!
//! Looks up one order through the tracking panel and prints the settled view.
//!
//! ```bash
//! storefront-tracking --endpoint https://proxy.example/track --order AA-2024-0047
//! storefront-tracking --link 'https://shop.example/?order=AA-2024-0047&email=jo@example.com#track'
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use storefront_tracking::framework::RetryPolicy;
use storefront_tracking::lifecycle::{
    load_animation_manifest, setup_tracing, TrackingConfig, TrackingSystem,
};
use storefront_tracking::model::SecondaryFilterField;
use storefront_tracking::tracking_actor::AnimationMode;
use tracing::{debug, error, info, Instrument};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "storefront-tracking", about = "Track a storefront order")]
struct Cli {
    /// Order lookup endpoint
    #[arg(long, env = "TRACKING_ENDPOINT")]
    endpoint: Option<String>,

    /// Per-attempt timeout in milliseconds
    #[arg(long, env = "TRACKING_TIMEOUT_MS", default_value_t = 10_000)]
    timeout_ms: u64,

    /// Attempts before giving up
    #[arg(long, env = "TRACKING_MAX_ATTEMPTS", default_value_t = 3)]
    max_attempts: u32,

    /// JSON manifest of animation URLs keyed by status
    #[arg(long, env = "TRACKING_ANIMATIONS")]
    animations: Option<PathBuf>,

    /// hidden, optional or required
    #[arg(long, env = "TRACKING_EMAIL_FIELD", default_value = "optional")]
    email_field: SecondaryFilterField,

    /// Navigation URL to apply as a deep link
    #[arg(long, conflicts_with_all = ["order", "email"])]
    link: Option<Url>,

    /// Order number
    #[arg(long, required_unless_present = "link")]
    order: Option<String>,

    /// Email used at checkout
    #[arg(long)]
    email: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<(TrackingConfig, Request), String> {
        let endpoint =
            TrackingConfig::parse_endpoint(self.endpoint.as_deref()).map_err(|e| e.to_string())?;
        let animation = match &self.animations {
            Some(path) => AnimationMode::RichEmbed(
                load_animation_manifest(path).map_err(|e| e.to_string())?,
            ),
            None => AnimationMode::Glyph,
        };

        let config = TrackingConfig {
            endpoint,
            retry: RetryPolicy::new(Duration::from_millis(self.timeout_ms), self.max_attempts),
            animation,
            secondary_filter: self.email_field,
            ..TrackingConfig::default()
        };

        let request = match self.link {
            Some(url) => Request::Link(url),
            None => Request::Form {
                identifier: self.order.unwrap_or_default(),
                secondary_filter: self.email.unwrap_or_default(),
            },
        };
        Ok((config, request))
    }
}

enum Request {
    Link(Url),
    Form {
        identifier: String,
        secondary_filter: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let (config, request) = Cli::parse().into_config()?;
    info!(endpoint = ?config.endpoint.as_ref().map(Url::as_str), "Starting tracking system");

    let system = TrackingSystem::new(config)?;

    let span = tracing::info_span!("lookup");
    let settled = async {
        match request {
            Request::Link(url) => {
                let Some(scheduled) = system.activate(&url).await else {
                    return Err(format!("{url} does not name an order to track"));
                };
                scheduled.await.map_err(|e| e.to_string())?;
            }
            Request::Form {
                identifier,
                secondary_filter,
            } => {
                match system
                    .tracking_client
                    .submit(&identifier, &secondary_filter)
                    .await
                {
                    Ok(sequence) => debug!(sequence, "Lookup started"),
                    Err(e) if e.is_actor_failure() => return Err(e.to_string()),
                    Err(e) => debug!(error = %e, "Submission rejected"),
                }
            }
        }
        system
            .tracking_client
            .wait_settled()
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;

    match &settled {
        Ok(state) => {
            info!(phase = ?state.phase, "Lookup settled");
            println!("{state}");
        }
        Err(e) => error!(error = %e, "Lookup failed"),
    }

    system.shutdown().await?;
    settled.map(|_| ())
}

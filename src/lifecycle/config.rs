//! # Configuration
//!
//! Everything the tracking system needs from the outside world. The binary
//! fills this from CLI flags and environment variables; tests build it
//! directly.

use crate::entry::{AUTO_SUBMIT_DELAY, TRACKING_ROUTE};
use crate::framework::RetryPolicy;
use crate::model::SecondaryFilterField;
use crate::tracking_actor::{AnimationManifest, AnimationMode};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid endpoint URL {0:?}: {1}")]
    InvalidEndpoint(String, url::ParseError),

    #[error("Failed to read animation manifest {path}: {source}")]
    ManifestRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid animation manifest {path}: {source}")]
    ManifestParse {
        path: String,
        source: serde_json::Error,
    },
}

/// Runtime configuration for a [`TrackingSystem`](super::TrackingSystem).
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingConfig {
    /// Lookup endpoint. `None` disables lookups with a configuration error.
    pub endpoint: Option<Url>,
    pub retry: RetryPolicy,
    pub animation: AnimationMode,
    pub secondary_filter: SecondaryFilterField,
    pub route_token: String,
    pub auto_submit_delay: Duration,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            retry: RetryPolicy::default(),
            animation: AnimationMode::Glyph,
            secondary_filter: SecondaryFilterField::Optional,
            route_token: TRACKING_ROUTE.to_string(),
            auto_submit_delay: AUTO_SUBMIT_DELAY,
        }
    }
}

impl TrackingConfig {
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Parses `raw` as the endpoint. Blank input leaves lookups disabled.
    pub fn parse_endpoint(raw: Option<&str>) -> Result<Option<Url>, ConfigError> {
        match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => Url::parse(raw)
                .map(Some)
                .map_err(|e| ConfigError::InvalidEndpoint(raw.to_string(), e)),
            None => Ok(None),
        }
    }
}

/// Loads an [`AnimationManifest`] from a JSON file.
pub fn load_animation_manifest(path: &Path) -> Result<AnimationManifest, ConfigError> {
    let display = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ManifestRead {
        path: display.clone(),
        source,
    })?;
    AnimationManifest::from_json(&json).map_err(|source| ConfigError::ManifestParse {
        path: display,
        source,
    })
}

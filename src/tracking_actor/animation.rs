//! Animation render modes for the status panel.
//!
//! The mode is resolved once from configuration. Rendering never re-reads
//! configuration or branches on strings.

use crate::model::StatusDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Shown while a lookup is in flight.
pub const LOADING_GLYPH: &str = "🔄";

/// Sandbox attribute applied to every embedded animation.
pub const EMBED_SANDBOX: &str = "allow-scripts";

/// Maps an animation key (e.g. `printing`) to an external animation resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationManifest(HashMap<String, Url>);

impl AnimationManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object of `{ "<key>": "<url>" }`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, key: impl Into<String>, url: Url) {
        self.0.insert(key.into(), url);
    }

    pub fn get(&self, key: &str) -> Option<&Url> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How status animations are rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnimationMode {
    /// Show the descriptor's glyph.
    #[default]
    Glyph,
    /// Embed the manifest's resource for the key, else fall back to the glyph.
    RichEmbed(AnimationManifest),
}

/// What the animation slot shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Animation {
    Glyph(&'static str),
    Embed { url: Url, sandbox: &'static str },
}

impl AnimationMode {
    pub fn render(&self, descriptor: &StatusDescriptor) -> Animation {
        match self {
            AnimationMode::RichEmbed(manifest) => match manifest.get(descriptor.animation_key) {
                Some(url) => Animation::Embed {
                    url: url.clone(),
                    sandbox: EMBED_SANDBOX,
                },
                None => Animation::Glyph(descriptor.glyph),
            },
            AnimationMode::Glyph => Animation::Glyph(descriptor.glyph),
        }
    }
}

//! # Status Registry
//!
//! The fixed table mapping each production stage to its display metadata and
//! timeline position. The table is built at compile time and never mutated.
//!
//! The eight stage labels are exact, case-sensitive strings. Their order in
//! [`STAGES`] is the order an order moves through production, and a label's
//! index there is its `stage_index`.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Number of stages on the timeline.
pub const STAGE_COUNT: usize = 8;

/// One of the eight known production stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusLabel {
    #[serde(rename = "Order Received")]
    OrderReceived,
    #[serde(rename = "In Queue")]
    InQueue,
    Printing,
    #[serde(rename = "Post-Processing")]
    PostProcessing,
    #[serde(rename = "Quality Control")]
    QualityControl,
    Packaging,
    Shipped,
    Delivered,
}

/// Canonical stage order.
pub const STAGES: [StatusLabel; STAGE_COUNT] = [
    StatusLabel::OrderReceived,
    StatusLabel::InQueue,
    StatusLabel::Printing,
    StatusLabel::PostProcessing,
    StatusLabel::QualityControl,
    StatusLabel::Packaging,
    StatusLabel::Shipped,
    StatusLabel::Delivered,
];

impl StatusLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusLabel::OrderReceived => "Order Received",
            StatusLabel::InQueue => "In Queue",
            StatusLabel::Printing => "Printing",
            StatusLabel::PostProcessing => "Post-Processing",
            StatusLabel::QualityControl => "Quality Control",
            StatusLabel::Packaging => "Packaging",
            StatusLabel::Shipped => "Shipped",
            StatusLabel::Delivered => "Delivered",
        }
    }

    /// Position on the timeline, `0..STAGE_COUNT`.
    pub const fn stage_index(self) -> usize {
        self as usize
    }
}

impl Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the eight stage labels.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown status label: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for StatusLabel {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGES
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Display metadata bound to a stage label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDescriptor {
    /// `None` only for [`DEFAULT_DESCRIPTOR`].
    pub label: Option<StatusLabel>,
    /// `None` means nothing on the timeline gets highlighted.
    pub stage_index: Option<usize>,
    pub animation_key: &'static str,
    pub glyph: &'static str,
    pub short_message: &'static str,
    pub long_description: &'static str,
}

impl StatusDescriptor {
    /// Title shown above the message.
    pub fn title(&self) -> &'static str {
        self.label.map(StatusLabel::as_str).unwrap_or("Status Unknown")
    }
}

const fn stage(
    label: StatusLabel,
    animation_key: &'static str,
    glyph: &'static str,
    short_message: &'static str,
    long_description: &'static str,
) -> StatusDescriptor {
    StatusDescriptor {
        label: Some(label),
        stage_index: Some(label.stage_index()),
        animation_key,
        glyph,
        short_message,
        long_description,
    }
}

static DESCRIPTORS: [StatusDescriptor; STAGE_COUNT] = [
    stage(
        StatusLabel::OrderReceived,
        "order-received",
        "📝",
        "We've received your order",
        "Your order is in our system and waiting to be reviewed by our team.",
    ),
    stage(
        StatusLabel::InQueue,
        "in-queue",
        "⏳",
        "Your print is in the queue",
        "Your order is lined up and will start as soon as a printer frees up.",
    ),
    stage(
        StatusLabel::Printing,
        "printing",
        "🖨️",
        "Your print is being created",
        "Your item is on the printer right now, being built layer by layer.",
    ),
    stage(
        StatusLabel::PostProcessing,
        "post-processing",
        "🔧",
        "Your print is being finished",
        "Supports are coming off and surfaces are being cleaned up by hand.",
    ),
    stage(
        StatusLabel::QualityControl,
        "quality-control",
        "🔍",
        "Your print is being inspected",
        "Every piece is checked for defects and dimensional accuracy before it ships.",
    ),
    stage(
        StatusLabel::Packaging,
        "packaging",
        "📦",
        "Your order is being packed",
        "Your order is being carefully packed so it arrives in one piece.",
    ),
    stage(
        StatusLabel::Shipped,
        "shipped",
        "🚚",
        "Your order is on its way",
        "Your package has left the workshop. Use the tracking number to follow it.",
    ),
    stage(
        StatusLabel::Delivered,
        "delivered",
        "✅",
        "Your order has been delivered",
        "Your package has arrived. Enjoy your print!",
    ),
];

/// Fallback for any status string outside the table.
pub static DEFAULT_DESCRIPTOR: StatusDescriptor = StatusDescriptor {
    label: None,
    stage_index: None,
    animation_key: "unknown",
    glyph: "📋",
    short_message: "We're checking on your order",
    long_description: "We couldn't match this status to a production stage. Contact us if you have questions.",
};

/// Looks up the descriptor for `label`, falling back to [`DEFAULT_DESCRIPTOR`].
pub fn describe(label: &str) -> &'static StatusDescriptor {
    match label.parse::<StatusLabel>() {
        Ok(known) => &DESCRIPTORS[known.stage_index()],
        Err(_) => &DEFAULT_DESCRIPTOR,
    }
}

/// The eight stage labels in timeline order.
pub fn stage_sequence() -> [&'static str; STAGE_COUNT] {
    STAGES.map(StatusLabel::as_str)
}

/// Timeline position of `label`, `None` for unknown labels.
pub fn index_of(label: &str) -> Option<usize> {
    stage_sequence().iter().position(|known| *known == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_index_matches_sequence_position() {
        for (position, label) in stage_sequence().iter().enumerate() {
            let descriptor = describe(label);
            assert_eq!(descriptor.stage_index, Some(position), "{label}");
            assert_eq!(index_of(label), Some(position));
            // pure: same answer twice
            assert_eq!(describe(label), descriptor);
        }
    }

    #[test]
    fn test_sequence_is_the_canonical_eight() {
        assert_eq!(
            stage_sequence(),
            [
                "Order Received",
                "In Queue",
                "Printing",
                "Post-Processing",
                "Quality Control",
                "Packaging",
                "Shipped",
                "Delivered",
            ]
        );
    }

    #[test]
    fn test_unknown_label_gets_default_descriptor() {
        let descriptor = describe("Unknown Status");
        assert_eq!(descriptor, &DEFAULT_DESCRIPTOR);
        assert_eq!(descriptor.stage_index, None);
        assert_eq!(index_of("Unknown Status"), None);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(describe("printing"), &DEFAULT_DESCRIPTOR);
        assert!("SHIPPED".parse::<StatusLabel>().is_err());
        assert_eq!("Shipped".parse::<StatusLabel>(), Ok(StatusLabel::Shipped));
    }

    #[test]
    fn test_printing_message() {
        assert_eq!(describe("Printing").short_message, "Your print is being created");
        assert_eq!(describe("Printing").title(), "Printing");
    }

    #[test]
    fn test_label_serde_uses_display_strings() {
        let json = serde_json::to_string(&StatusLabel::PostProcessing).unwrap();
        assert_eq!(json, "\"Post-Processing\"");
    }
}

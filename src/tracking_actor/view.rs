//! # Tracking Panel View State
//!
//! [`ViewState`] is the headless rendition of the tracking panel: the phase,
//! the status message, the animation slot, the eight-stage timeline, the detail
//! widgets and the form fields. Only the [`TrackingActor`](super::TrackingActor)
//! mutates it; everyone else gets published copies.
//!
//! Every render starts from a cleared panel, so rendering the same result twice
//! produces the same state and nothing from a previous lookup leaks through.

use crate::clients::ERROR_TITLE;
use crate::model::{
    describe, format_display_date, stage_sequence, OrderRecord, SecondaryFilterField,
    StatusDescriptor, STAGE_COUNT,
};
use crate::tracking_actor::animation::{Animation, AnimationMode, LOADING_GLYPH};
use crate::tracking_actor::TrackingError;
use std::fmt::{self, Display};

/// Where the panel is in its lifecycle. There is no terminal phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Displayed,
    Error,
}

/// Highlight state of one timeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StageMark {
    #[default]
    Pending,
    Completed,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineStage {
    pub label: &'static str,
    pub mark: StageMark,
}

/// The eight-stage production timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub visible: bool,
    pub stages: [TimelineStage; STAGE_COUNT],
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            visible: false,
            stages: stage_sequence().map(|label| TimelineStage {
                label,
                mark: StageMark::Pending,
            }),
        }
    }
}

impl Timeline {
    /// Stages before `stage_index` are completed, the stage itself is active,
    /// later stages stay pending. `None` highlights nothing.
    fn highlight(&mut self, stage_index: Option<usize>) {
        for (index, stage) in self.stages.iter_mut().enumerate() {
            stage.mark = match stage_index {
                Some(active) if index < active => StageMark::Completed,
                Some(active) if index == active => StageMark::Active,
                _ => StageMark::Pending,
            };
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.stages
            .iter()
            .position(|stage| stage.mark == StageMark::Active)
    }

    pub fn marks(&self) -> [StageMark; STAGE_COUNT] {
        self.stages.clone().map(|stage| stage.mark)
    }
}

/// Optional order details. `None` means the widget is hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPanel {
    pub order_id: Option<String>,
    pub product: Option<String>,
    pub tracking_number: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl DetailPanel {
    fn from_order(order: &OrderRecord) -> Self {
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(escape_html)
        };
        let date = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| escape_html(&format_display_date(v)))
        };

        Self {
            order_id: Some(escape_html(&order.order_id)),
            product: text(&order.product),
            tracking_number: text(&order.tracking_number),
            created: date(&order.created_date),
            updated: date(&order.updated_date),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The tracking form's input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub identifier: String,
    pub secondary_filter: String,
    pub secondary_field: SecondaryFilterField,
}

/// Everything the tracking panel shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub phase: Phase,
    pub descriptor: Option<&'static StatusDescriptor>,
    pub title: Option<String>,
    /// Already escaped for insertion as text.
    pub message: Option<String>,
    pub description: Option<String>,
    pub animation: Option<Animation>,
    pub timeline: Timeline,
    pub details: DetailPanel,
    pub form: FormFields,
    /// Sequence number of the submission this state belongs to.
    pub sequence: u64,
}

impl ViewState {
    pub fn new(secondary_field: SecondaryFilterField) -> Self {
        Self {
            form: FormFields {
                secondary_field,
                ..FormFields::default()
            },
            ..Self::default()
        }
    }

    fn clear_panel(&mut self) {
        self.descriptor = None;
        self.title = None;
        self.message = None;
        self.description = None;
        self.animation = None;
        self.timeline = Timeline::default();
        self.details = DetailPanel::default();
    }

    pub(crate) fn begin_loading(&mut self, sequence: u64) {
        self.clear_panel();
        self.phase = Phase::Loading;
        self.sequence = sequence;
        self.animation = Some(Animation::Glyph(LOADING_GLYPH));
    }

    pub(crate) fn show_order(&mut self, order: &OrderRecord, mode: &AnimationMode) {
        self.clear_panel();
        let descriptor = describe(&order.status);

        self.phase = Phase::Displayed;
        self.descriptor = Some(descriptor);
        self.animation = Some(mode.render(descriptor));
        self.title = Some(descriptor.title().to_string());
        self.message = Some(escape_html(descriptor.short_message));
        self.description = Some(escape_html(descriptor.long_description));
        self.details = DetailPanel::from_order(order);
        self.timeline.visible = true;
        self.timeline.highlight(descriptor.stage_index);
    }

    pub(crate) fn show_error(&mut self, error: &TrackingError) {
        self.clear_panel();
        self.phase = Phase::Error;
        self.title = Some(ERROR_TITLE.to_string());
        self.message = Some(escape_html(&error.to_string()));
    }

    pub(crate) fn reset(&mut self) {
        let secondary_field = self.form.secondary_field;
        *self = Self::new(secondary_field);
    }
}

/// Escapes text for insertion into an HTML text node.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.animation {
            Some(Animation::Glyph(glyph)) => write!(f, "{glyph} ")?,
            Some(Animation::Embed { ref url, .. }) => write!(f, "[{url}] ")?,
            None => {}
        }
        match self.phase {
            Phase::Idle => return writeln!(f, "Enter an order number to track it."),
            Phase::Loading => return writeln!(f, "Looking up your order..."),
            Phase::Displayed | Phase::Error => {}
        }
        writeln!(f, "{}", self.title.as_deref().unwrap_or_default())?;
        if let Some(message) = &self.message {
            writeln!(f, "  {message}")?;
        }
        if let Some(description) = &self.description {
            writeln!(f, "  {description}")?;
        }

        if self.timeline.visible {
            writeln!(f)?;
            for stage in &self.timeline.stages {
                let mark = match stage.mark {
                    StageMark::Completed => "[x]",
                    StageMark::Active => "[>]",
                    StageMark::Pending => "[ ]",
                };
                writeln!(f, "  {mark} {}", stage.label)?;
            }
        }

        let details = [
            ("Order", &self.details.order_id),
            ("Product", &self.details.product),
            ("Tracking", &self.details.tracking_number),
            ("Placed", &self.details.created),
            ("Updated", &self.details.updated),
        ];
        if !self.details.is_empty() {
            writeln!(f)?;
        }
        for (name, value) in details {
            if let Some(value) = value {
                writeln!(f, "  {name}: {value}")?;
            }
        }
        Ok(())
    }
}

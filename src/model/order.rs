//! Order lookup data: the validated request, the wire envelope and the
//! outcome of a lookup.
//!
//! # Validation
//! A [`LookupRequest`] can only be built through [`LookupRequest::new`], which
//! runs every local check. Holding one means the identifier is well formed and
//! the secondary filter satisfies the configured field rules.
use crate::framework::FetchError;
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// Identifier pattern: two uppercase letters, 4 digits, 4 digits.
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}-[0-9]{4}-[0-9]{4}$").unwrap());

/// Loose email shape used for the secondary filter.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Local, pre-network validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your order number.")]
    MissingIdentifier,

    #[error("Order numbers look like AA-2024-0047. Please check and try again.")]
    BadFormat,

    #[error("Please enter the email address used for this order.")]
    MissingSecondaryFilter,

    #[error("Please enter a valid email address.")]
    BadSecondaryFilter,
}

/// How the secondary filter (email) field appears on the tracking form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryFilterField {
    /// Not shown; any value is ignored.
    Hidden,
    /// Shown; may be left blank.
    #[default]
    Optional,
    /// Shown; must be filled in.
    Required,
}

impl FromStr for SecondaryFilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hidden" => Ok(Self::Hidden),
            "optional" => Ok(Self::Optional),
            "required" => Ok(Self::Required),
            other => Err(format!("unknown email field mode: {other}")),
        }
    }
}

/// Returns `true` if `identifier` is shaped like `AA-2024-0047`.
pub fn is_valid_identifier(identifier: &str) -> bool {
    IDENTIFIER_RE.is_match(identifier)
}

/// Returns `true` if `value` is shaped like `local@domain.tld`.
pub fn is_valid_secondary_filter(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// A lookup that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    identifier: String,
    secondary_filter: Option<String>,
}

impl LookupRequest {
    /// Validates raw form input.
    ///
    /// # Rules
    /// 1. The trimmed identifier must be non-empty and match the identifier pattern.
    /// 2. With a visible field, a blank secondary filter is an error only when
    ///    the field is [`SecondaryFilterField::Required`].
    /// 3. A non-blank secondary filter on a visible field must be email-shaped.
    pub fn new(
        identifier: &str,
        secondary_filter: &str,
        field: SecondaryFilterField,
    ) -> Result<Self, ValidationError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ValidationError::MissingIdentifier);
        }
        if !is_valid_identifier(identifier) {
            return Err(ValidationError::BadFormat);
        }

        let secondary_filter = secondary_filter.trim();
        let secondary_filter = match field {
            SecondaryFilterField::Hidden => None,
            SecondaryFilterField::Required if secondary_filter.is_empty() => {
                return Err(ValidationError::MissingSecondaryFilter)
            }
            SecondaryFilterField::Optional if secondary_filter.is_empty() => None,
            _ if !is_valid_secondary_filter(secondary_filter) => {
                return Err(ValidationError::BadSecondaryFilter)
            }
            _ => Some(secondary_filter.to_string()),
        };

        Ok(Self {
            identifier: identifier.to_string(),
            secondary_filter,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secondary_filter(&self) -> Option<&str> {
        self.secondary_filter.as_deref()
    }
}

/// An order as returned by the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: String,
    /// Usually one of the eight stage labels, but any string is accepted.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

impl OrderRecord {
    pub fn new(order_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            status: status.into(),
            product: None,
            tracking_number: None,
            created_date: None,
            updated_date: None,
        }
    }
}

/// Formats an ISO 8601 date or timestamp as `Jan 5, 2024`.
///
/// Anything chrono cannot parse is returned unchanged.
pub fn format_display_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format("%b %-d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    raw.to_string()
}

/// The JSON wrapper returned by the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a lookup. Only `Found` carries a status.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Found(OrderRecord),
    NotFound { message: String },
    Invalid(ValidationError),
    TransportFailure(FetchError),
}

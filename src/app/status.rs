//! Canonical delivery states and status comparison
//!
//! The backend and the app agree on a fixed list of bilingual labels, but the
//! stored text may differ in case or spacing. Every comparison therefore goes
//! through [`normalize`].

use std::borrow::Cow;
use std::fmt;

use crate::app::models::Shipment;
use crate::constants::status;

/// The fixed, ordered list of canonical status labels
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCatalog;

impl StatusCatalog {
    /// All labels in display order
    pub fn labels(&self) -> &'static [&'static str] {
        &status::CANONICAL
    }

    /// Number of canonical labels
    pub fn len(&self) -> usize {
        status::CANONICAL.len()
    }

    /// Whether the catalog has no labels; it never does
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Label at a 1-based position, as shown to the driver
    pub fn by_index(&self, index: usize) -> Option<&'static str> {
        index
            .checked_sub(1)
            .and_then(|i| status::CANONICAL.get(i).copied())
    }

    /// Canonical label matching `text` after normalization
    pub fn find(&self, text: &str) -> Option<&'static str> {
        let wanted = normalize(text);
        status::CANONICAL
            .iter()
            .copied()
            .find(|label| normalize(label) == wanted)
    }

    /// Whether `text` names one of the canonical labels
    pub fn is_canonical(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// Every label except the one already in effect
    pub fn available_transitions(&self, current: &str) -> Vec<&'static str> {
        let current = normalize(current);
        status::CANONICAL
            .iter()
            .copied()
            .filter(|label| normalize(label) != current)
            .collect()
    }
}

/// Trim, lowercase and collapse internal whitespace runs to one space
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compare two status strings after normalization
pub fn same_status(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Whether a label denotes a delivered shipment, in either language
pub fn is_delivered(text: &str) -> bool {
    let lowered = text.to_lowercase();
    status::DELIVERED_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Status selection applied to the shipment list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filtering
    #[default]
    All,
    /// Only shipments whose status matches this label
    Status(String),
}

impl StatusFilter {
    /// Parse a selection; the "Todos" sentinel (any case or spacing) means all
    pub fn parse(selection: &str) -> Self {
        if same_status(selection, status::ALL_SENTINEL) {
            StatusFilter::All
        } else {
            StatusFilter::Status(selection.to_string())
        }
    }

    /// Whether a shipment passes this filter
    pub fn matches(&self, shipment: &Shipment) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(wanted) => shipment
                .status
                .as_deref()
                .is_some_and(|s| same_status(s, wanted)),
        }
    }

    /// The filter chips offered to the driver: the sentinel, then the catalog
    pub fn choices() -> Vec<&'static str> {
        std::iter::once(status::ALL_SENTINEL)
            .chain(status::CANONICAL.iter().copied())
            .collect()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(status::ALL_SENTINEL),
            StatusFilter::Status(label) => f.write_str(label),
        }
    }
}

/// Apply a filter to a list of shipments
///
/// With [`StatusFilter::All`] the input slice is handed back untouched.
pub fn filter_shipments<'a>(shipments: &'a [Shipment], filter: &StatusFilter) -> Cow<'a, [Shipment]> {
    match filter {
        StatusFilter::All => Cow::Borrowed(shipments),
        StatusFilter::Status(_) => Cow::Owned(
            shipments
                .iter()
                .filter(|s| filter.matches(s))
                .cloned()
                .collect(),
        ),
    }
}

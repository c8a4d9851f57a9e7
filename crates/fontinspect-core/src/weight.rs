#![forbid(unsafe_code)]

//! Human-readable names for CSS `font-weight` values.
//!
//! Computed styles report weights as numeric strings (`"700"`), but authors
//! and design tools talk about `Bold`, `SemiBold`, and so on. The table below
//! covers the nine standard stops plus `950` and the two CSS keywords.
//!
//! Anything outside the table (variable-font weights such as `550`, or
//! garbage) is returned unchanged. The raw value is always kept next to the
//! label in [`FontWeight`] so nothing is lost when the label is a fallback.

use std::borrow::Cow;
use std::fmt;

const WEIGHT_NAMES: &[(&str, &str)] = &[
    ("100", "Thin"),
    ("200", "ExtraLight"),
    ("300", "Light"),
    ("400", "Regular"),
    ("normal", "Regular"),
    ("500", "Medium"),
    ("600", "SemiBold"),
    ("700", "Bold"),
    ("bold", "Bold"),
    ("800", "ExtraBold"),
    ("900", "Black"),
    ("950", "ExtraBlack"),
];

/// Look up the named weight for `raw`, if it has one.
///
/// Lookup ignores ASCII case and surrounding whitespace.
#[must_use]
pub fn named_weight(raw: &str) -> Option<&'static str> {
    let key = raw.trim();
    WEIGHT_NAMES
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(key))
        .map(|(_, name)| *name)
}

/// Map a raw weight to its display label, passing unknown values through.
#[must_use]
pub fn weight_label(raw: &str) -> Cow<'_, str> {
    match named_weight(raw) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Borrowed(raw),
    }
}

/// A computed `font-weight` value together with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontWeight {
    raw: String,
}

impl FontWeight {
    /// Wrap a raw weight string as reported by the host.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The value exactly as the computed style reported it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The human-readable label, or the raw value when unnamed.
    #[must_use]
    pub fn label(&self) -> Cow<'_, str> {
        weight_label(&self.raw)
    }

    /// Whether the value maps to one of the named stops.
    #[must_use]
    pub fn is_named(&self) -> bool {
        named_weight(&self.raw).is_some()
    }
}

impl From<&str> for FontWeight {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for FontWeight {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        Self::new(value.to_string())
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

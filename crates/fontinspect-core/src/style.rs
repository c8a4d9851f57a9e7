#![forbid(unsafe_code)]

//! Style resolution: from a selection's anchor node to [`StyleFacts`].

use std::fmt;

use crate::color::{is_hex6, normalize_hex};
use crate::page::{ComputedStyle, HostError, Page};
use crate::weight::FontWeight;

/// Why a node's style could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
    /// The node has no element ancestor (detached or dissolved).
    Detached,
    /// The host returned no computed style for the element.
    MissingStyle,
    /// A host query failed.
    Host(String),
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => write!(f, "selection anchor is not attached to an element"),
            Self::MissingStyle => write!(f, "no computed style for selection anchor"),
            Self::Host(msg) => write!(f, "host query failed: {msg}"),
        }
    }
}

impl std::error::Error for InspectError {}

impl From<HostError> for InspectError {
    fn from(e: HostError) -> Self {
        Self::Host(e.0)
    }
}

/// Normalized typography of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleFacts {
    /// First family in the computed list, unquoted.
    pub font_family: String,
    /// Raw weight plus derived label.
    pub font_weight: FontWeight,
    /// Computed size, e.g. `"16px"`.
    pub font_size_px: String,
    /// `#RRGGBB`, or the raw color when it could not be converted.
    pub color_hex: String,
}

impl StyleFacts {
    /// Build facts from raw computed values.
    #[must_use]
    pub fn from_computed(style: &ComputedStyle) -> Self {
        Self {
            font_family: primary_family(&style.font_family),
            font_weight: FontWeight::new(style.font_weight.as_str()),
            font_size_px: style.font_size.clone(),
            color_hex: normalize_hex(&style.color).into_owned(),
        }
    }

    /// Whether [`color_hex`](Self::color_hex) is a real six-digit hex value.
    #[must_use]
    pub fn has_hex_color(&self) -> bool {
        is_hex6(&self.color_hex)
    }
}

/// First entry of a `font-family` list with one layer of quotes removed.
#[must_use]
pub fn primary_family(list: &str) -> String {
    let first = list.split(',').next().unwrap_or_default().trim();
    let unquoted = first.strip_prefix(['"', '\'']).unwrap_or(first);
    unquoted
        .strip_suffix(['"', '\''])
        .unwrap_or(unquoted)
        .to_owned()
}

/// Resolve the computed style for `node`, delegating text nodes to their
/// parent element.
pub fn resolve_style<P: Page>(page: &P, node: &P::Node) -> Result<StyleFacts, InspectError> {
    let element = page.element_for(node).ok_or(InspectError::Detached)?;
    let computed = page
        .computed_style(&element)?
        .ok_or(InspectError::MissingStyle)?;
    Ok(StyleFacts::from_computed(&computed))
}

#![forbid(unsafe_code)]

//! The DOM/viewport boundary.
//!
//! The core never touches a real document. Hosts implement [`Page`] with
//! read-only queries; the only writes (overlay element, acknowledgments) go
//! through [`Effect`](crate::controller::Effect) values instead.

use crate::geometry::{AnchorRect, Viewport};

/// The user's current text selection, captured once per debounce cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot<N> {
    /// Selected text as the browser stringifies it.
    pub text: String,
    /// Bounding rectangle of the first range, viewport-relative.
    pub anchor_rect: AnchorRect,
    /// The selection's anchor node (text node or element).
    pub source_node: N,
}

impl<N> SelectionSnapshot<N> {
    /// Whether the selection has something worth inspecting.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Raw computed-style values for an element, as the browser reports them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComputedStyle {
    /// Full `font-family` list.
    pub font_family: String,
    /// `font-weight`, typically numeric (`"700"`).
    pub font_weight: String,
    /// `font-size` in pixels (`"16px"`).
    pub font_size: String,
    /// `color`, typically `rgb()`/`rgba()`.
    pub color: String,
}

/// Error returned by host queries.
///
/// Hosts convert their native failure (e.g. a JS exception) into a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError(pub String);

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for HostError {}

/// Read-only view of the host page.
pub trait Page {
    /// Host node handle.
    type Node: Clone;

    /// The current selection, or `None` when there is no range or it is
    /// collapsed.
    fn selection(&self) -> Option<SelectionSnapshot<Self::Node>>;

    /// Current viewport size and scroll offsets.
    fn viewport(&self) -> Viewport;

    /// The nearest element for `node`: itself for elements, the parent
    /// element for text nodes. `None` for detached nodes.
    fn element_for(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Computed style of an element, `None` when the host has none for it.
    fn computed_style(&self, element: &Self::Node) -> Result<Option<ComputedStyle>, HostError>;

    /// Whether `node` sits inside the overlay element.
    fn is_within_overlay(&self, node: &Self::Node) -> bool;
}

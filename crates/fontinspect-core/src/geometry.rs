#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixels.
//!
//! Two coordinate spaces are in play:
//! - **viewport** coordinates, as returned by `getBoundingClientRect()`;
//! - **document** coordinates, viewport plus the current scroll offsets,
//!   used for absolutely positioned elements.

use serde::{Deserialize, Serialize};

/// Bounding rectangle of a selection range, viewport-relative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorRect {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl AnchorRect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Horizontal center.
    #[inline]
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// A point in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub top: f64,
    pub left: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Fixed dimensions of a floating panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Visible viewport: client size plus scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Client width (excludes the vertical scrollbar).
    pub width: f64,
    /// Client height.
    pub height: f64,
    /// Horizontal scroll offset (`window.scrollX`).
    pub scroll_x: f64,
    /// Vertical scroll offset (`window.scrollY`).
    pub scroll_y: f64,
}

impl Viewport {
    /// Create an unscrolled viewport.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Set the scroll offsets.
    #[inline]
    #[must_use]
    pub const fn scrolled(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_edges() {
        let rect = AnchorRect::new(100.0, 40.0, 60.0, 18.0);
        assert_eq!(rect.bottom(), 118.0);
        assert_eq!(rect.right(), 100.0);
        assert_eq!(rect.center_x(), 70.0);
    }

    #[test]
    fn scrolled_viewport_keeps_size() {
        let viewport = Viewport::new(800.0, 600.0).scrolled(5.0, 250.0);
        assert_eq!(viewport.width, 800.0);
        assert_eq!(viewport.scroll_y, 250.0);
    }
}

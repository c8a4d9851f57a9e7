#![forbid(unsafe_code)]

//! Overlay placement relative to a selection.
//!
//! # Algorithm
//!
//! 1. Place the panel above the anchor:
//!    `top = anchor.top + scroll_y - H - offset`.
//! 2. If that would cross the viewport top (`anchor.top - H - offset < 0`),
//!    flip below: `top = anchor.bottom + scroll_y + offset`.
//! 3. Center horizontally: `left = anchor.left + scroll_x + anchor.width/2 - W/2`,
//!    then clamp to `margin`, then clamp to `viewport.width - W - margin`.
//!
//! # Invariants
//!
//! 1. The low clamp is applied before the high clamp, so on a viewport
//!    narrower than `W + 2·margin` the panel aligns to the right margin.
//! 2. The high clamp uses the client width only (no `scroll_x`).
//! 3. Placement never consults other page elements.

use serde::{Deserialize, Serialize};

use crate::geometry::{AnchorRect, Point, Size, Viewport};

/// Placement parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionerConfig {
    /// Panel dimensions.
    pub panel: Size,
    /// Gap between anchor and panel.
    pub vertical_offset: f64,
    /// Minimum distance from either viewport edge.
    pub edge_margin: f64,
}

impl Default for PositionerConfig {
    fn default() -> Self {
        Self {
            panel: Size::new(330.0, 40.0),
            vertical_offset: 12.0,
            edge_margin: 10.0,
        }
    }
}

/// Which side of the anchor the panel ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Above,
    Below,
}

/// Result of a placement: document-space origin plus the chosen side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Point,
    pub side: Side,
}

/// Compute the document-space origin for the overlay.
#[must_use]
pub fn place(anchor: &AnchorRect, viewport: &Viewport, config: &PositionerConfig) -> Placement {
    let panel = config.panel;
    let offset = config.vertical_offset;

    let (top, side) = if anchor.top - panel.height - offset < 0.0 {
        (anchor.bottom() + viewport.scroll_y + offset, Side::Below)
    } else {
        (
            anchor.top + viewport.scroll_y - panel.height - offset,
            Side::Above,
        )
    };

    let mut left = anchor.left + viewport.scroll_x + anchor.width / 2.0 - panel.width / 2.0;
    if left < config.edge_margin {
        left = config.edge_margin;
    }
    let max_left = viewport.width - panel.width - config.edge_margin;
    if left > max_left {
        left = max_left;
    }

    Placement {
        position: Point::new(top, left),
        side,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 330.0;
    const H: f64 = 40.0;
    const OFFSET: f64 = 12.0;

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    #[test]
    fn default_placement_is_above() {
        let anchor = AnchorRect::new(300.0, 500.0, 80.0, 20.0);
        let placed = place(&anchor, &viewport(), &PositionerConfig::default());
        assert_eq!(placed.side, Side::Above);
        assert_eq!(placed.position.top, 300.0 - H - OFFSET);
    }

    #[test]
    fn near_top_flips_below() {
        let anchor = AnchorRect::new(30.0, 500.0, 80.0, 20.0);
        let view = viewport().scrolled(0.0, 1200.0);
        let placed = place(&anchor, &view, &PositionerConfig::default());
        assert_eq!(placed.side, Side::Below);
        assert_eq!(placed.position.top, anchor.bottom() + 1200.0 + OFFSET);
    }

    #[test]
    fn exactly_fitting_stays_above() {
        let anchor = AnchorRect::new(H + OFFSET, 500.0, 80.0, 20.0);
        let placed = place(&anchor, &viewport(), &PositionerConfig::default());
        assert_eq!(placed.side, Side::Above);
        assert_eq!(placed.position.top, 0.0);
    }

    #[test]
    fn scroll_shifts_above_placement() {
        let anchor = AnchorRect::new(300.0, 500.0, 80.0, 20.0);
        let view = viewport().scrolled(0.0, 450.0);
        let placed = place(&anchor, &view, &PositionerConfig::default());
        assert_eq!(placed.position.top, 300.0 + 450.0 - H - OFFSET);
    }

    #[test]
    fn centers_on_anchor() {
        let anchor = AnchorRect::new(300.0, 500.0, 80.0, 20.0);
        let placed = place(&anchor, &viewport(), &PositionerConfig::default());
        assert_eq!(placed.position.left, 500.0 + 40.0 - W / 2.0);
    }

    #[test]
    fn near_left_edge_clamps_to_margin() {
        let anchor = AnchorRect::new(300.0, 5.0, 30.0, 20.0);
        let placed = place(&anchor, &viewport(), &PositionerConfig::default());
        assert_eq!(placed.position.left, 10.0);
    }

    #[test]
    fn near_right_edge_clamps_to_max_left() {
        let anchor = AnchorRect::new(300.0, 1250.0, 25.0, 20.0);
        let placed = place(&anchor, &viewport(), &PositionerConfig::default());
        assert_eq!(placed.position.left, 1280.0 - W - 10.0);
    }

    #[test]
    fn narrow_viewport_aligns_to_right_margin() {
        let anchor = AnchorRect::new(300.0, 20.0, 40.0, 20.0);
        let narrow = Viewport::new(200.0, 600.0);
        let placed = place(&anchor, &narrow, &PositionerConfig::default());
        assert_eq!(placed.position.left, 200.0 - W - 10.0);
    }
}

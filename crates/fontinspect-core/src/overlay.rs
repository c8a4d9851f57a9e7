#![forbid(unsafe_code)]

//! Declarative overlay view.
//!
//! [`render`] is a pure function from resolved [`StyleFacts`] and a
//! [`Placement`] to an [`OverlayView`]. Hosts materialize the view into their
//! own element and treat that element as a cache: the view, held in
//! [`OverlayState`], is the source of truth.

use serde::Serialize;

use crate::geometry::Point;
use crate::position::{Placement, Side};
use crate::style::StyleFacts;

/// DOM events the overlay container swallows so they never reach
/// page-level listeners.
pub const CONTAINED_EVENTS: [&str; 3] = ["mousedown", "mouseup", "click"];

/// The four copyable fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Family,
    Weight,
    Size,
    Color,
}

impl FieldKind {
    pub const ALL: [Self; 4] = [Self::Family, Self::Weight, Self::Size, Self::Color];

    /// Stable identifier used for DOM `data-field` attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Weight => "weight",
            Self::Size => "size",
            Self::Color => "color",
        }
    }
}

/// One clickable field of the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayField {
    pub kind: FieldKind,
    /// Small muted label shown before the text (`"Wt:"`).
    pub prefix: Option<&'static str>,
    /// Displayed text.
    pub text: String,
    /// Value written to the clipboard on click.
    pub copy_value: String,
    /// Passive disclosure (tooltip).
    pub title: String,
    /// Swatch fill, present only for a valid hex color.
    pub swatch: Option<String>,
}

/// Complete overlay content and placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub position: Point,
    pub side: Side,
    pub fields: Vec<OverlayField>,
}

impl OverlayView {
    /// Look up a field by kind.
    #[must_use]
    pub fn field(&self, kind: FieldKind) -> Option<&OverlayField> {
        self.fields.iter().find(|field| field.kind == kind)
    }
}

/// Build the overlay view for `facts` at `placement`.
///
/// The weight field copies the label but always discloses the raw value in
/// its title, including when the label is the raw value itself.
#[must_use]
pub fn render(facts: &StyleFacts, placement: Placement) -> OverlayView {
    let weight_label = facts.font_weight.label().into_owned();
    let hex = facts.has_hex_color();
    let color_text = if hex {
        facts.color_hex.to_ascii_uppercase()
    } else {
        facts.color_hex.clone()
    };
    let fields = vec![
        OverlayField {
            kind: FieldKind::Family,
            prefix: None,
            text: facts.font_family.clone(),
            copy_value: facts.font_family.clone(),
            title: "Copy Font Name".to_owned(),
            swatch: None,
        },
        OverlayField {
            kind: FieldKind::Weight,
            prefix: Some("Wt:"),
            text: weight_label.clone(),
            copy_value: weight_label,
            title: format!("Original Weight: {}", facts.font_weight.raw()),
            swatch: None,
        },
        OverlayField {
            kind: FieldKind::Size,
            prefix: None,
            text: facts.font_size_px.clone(),
            copy_value: facts.font_size_px.clone(),
            title: "Copy Font Size".to_owned(),
            swatch: None,
        },
        OverlayField {
            kind: FieldKind::Color,
            prefix: None,
            text: color_text,
            copy_value: facts.color_hex.clone(),
            title: "Copy Color Hex".to_owned(),
            swatch: hex.then(|| facts.color_hex.clone()),
        },
    ];

    OverlayView {
        position: placement.position,
        side: placement.side,
        fields,
    }
}

/// The overlay singleton's state.
///
/// Created lazily (not mounted until the first show) and kept for the page's
/// lifetime. Only the controller writes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    mounted: bool,
    visible: bool,
    view: Option<OverlayView>,
}

impl OverlayState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mounted: false,
            visible: false,
            view: None,
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last rendered position, if the overlay was ever shown.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.view.as_ref().map(|view| view.position)
    }

    /// Last rendered view. Kept after hiding so the host can reuse it.
    #[must_use]
    pub fn view(&self) -> Option<&OverlayView> {
        self.view.as_ref()
    }

    pub(crate) fn show(&mut self, view: OverlayView) {
        self.mounted = true;
        self.visible = true;
        self.view = Some(view);
    }

    /// Mark hidden. Returns whether anything changed.
    pub(crate) fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weight::FontWeight;
    use pretty_assertions::assert_eq;

    #[test]
    fn container_swallows_pointer_and_click() {
        for event in ["mousedown", "mouseup", "click"] {
            assert!(CONTAINED_EVENTS.contains(&event), "{event} must not bubble");
        }
    }

    fn facts(weight: &str, color: &str) -> StyleFacts {
        StyleFacts {
            font_family: "Arial".into(),
            font_weight: FontWeight::new(weight),
            font_size_px: "16px".into(),
            color_hex: color.into(),
        }
    }

    fn placement() -> Placement {
        Placement {
            position: Point::new(100.0, 40.0),
            side: Side::Above,
        }
    }

    #[test]
    fn renders_four_fields_in_order() {
        let view = render(&facts("700", "#000000"), placement());
        let kinds: Vec<_> = view.fields.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, FieldKind::ALL.to_vec());
        assert_eq!(view.position, Point::new(100.0, 40.0));
    }

    #[test]
    fn weight_field_copies_label_and_discloses_raw() {
        let view = render(&facts("700", "#000000"), placement());
        let weight = view.field(FieldKind::Weight).expect("weight field");
        assert_eq!(
            weight,
            &OverlayField {
                kind: FieldKind::Weight,
                prefix: Some("Wt:"),
                text: "Bold".into(),
                copy_value: "Bold".into(),
                title: "Original Weight: 700".into(),
                swatch: None,
            }
        );
    }

    #[test]
    fn unnamed_weight_still_discloses_raw() {
        let view = render(&facts("550", "#000000"), placement());
        let weight = view.field(FieldKind::Weight).expect("weight field");
        assert_eq!(weight.copy_value, "550");
        assert_eq!(weight.title, "Original Weight: 550");
    }

    #[test]
    fn color_field_has_swatch_for_hex() {
        let view = render(&facts("400", "#abc123"), placement());
        let color = view.field(FieldKind::Color).expect("color field");
        assert_eq!(color.text, "#ABC123");
        assert_eq!(color.copy_value, "#abc123");
        assert_eq!(color.swatch.as_deref(), Some("#abc123"));
    }

    #[test]
    fn unknown_color_renders_verbatim_without_swatch() {
        let view = render(&facts("400", "hsl(0,0%,0%)"), placement());
        let color = view.field(FieldKind::Color).expect("color field");
        assert_eq!(color.text, "hsl(0,0%,0%)");
        assert_eq!(color.copy_value, "hsl(0,0%,0%)");
        assert_eq!(color.swatch, None);
    }

    #[test]
    fn state_is_lazy_and_hide_reports_change() {
        let mut state = OverlayState::new();
        assert!(!state.is_mounted());
        assert!(!state.hide());

        state.show(render(&facts("400", "#000000"), placement()));
        assert!(state.is_mounted());
        assert!(state.is_visible());
        assert_eq!(state.position(), Some(Point::new(100.0, 40.0)));

        assert!(state.hide());
        assert!(!state.is_visible());
        assert!(state.is_mounted());
        assert!(!state.hide());
    }
}

#![forbid(unsafe_code)]

//! [`Page`] over the live document.

use fontinspect_core::geometry::{AnchorRect, Viewport};
use fontinspect_core::page::{ComputedStyle, HostError, Page, SelectionSnapshot};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, Node, Window};

/// Render a JS exception as a log-friendly string.
pub(crate) fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Read-only queries against the host page.
pub struct DomPage {
    window: Window,
    document: Document,
    overlay_selector: String,
}

impl DomPage {
    #[must_use]
    pub fn new(window: Window, document: Document, overlay_id: &str) -> Self {
        Self {
            window,
            document,
            overlay_selector: format!("#{overlay_id}"),
        }
    }

    /// Whether an event target is the overlay or lies inside it.
    #[must_use]
    pub fn target_within_overlay(&self, target: Option<EventTarget>) -> bool {
        target
            .and_then(|t| t.dyn_into::<Node>().ok())
            .is_some_and(|node| self.is_within_overlay(&node))
    }
}

impl Page for DomPage {
    type Node = Node;

    fn selection(&self) -> Option<SelectionSnapshot<Node>> {
        let selection = self.window.get_selection().ok().flatten()?;
        if selection.range_count() == 0 || selection.is_collapsed() {
            return None;
        }
        let source_node = selection.anchor_node()?;
        let rect = selection.get_range_at(0).ok()?.get_bounding_client_rect();
        Some(SelectionSnapshot {
            text: String::from(selection.to_string()),
            anchor_rect: AnchorRect::new(rect.top(), rect.left(), rect.width(), rect.height()),
            source_node,
        })
    }

    fn viewport(&self) -> Viewport {
        let (width, height) = match self.document.document_element() {
            Some(root) => (f64::from(root.client_width()), f64::from(root.client_height())),
            None => (
                self.window
                    .inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or_default(),
                self.window
                    .inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or_default(),
            ),
        };
        Viewport::new(width, height).scrolled(
            self.window.scroll_x().unwrap_or_default(),
            self.window.scroll_y().unwrap_or_default(),
        )
    }

    fn element_for(&self, node: &Node) -> Option<Node> {
        if node.node_type() == Node::ELEMENT_NODE {
            Some(node.clone())
        } else {
            node.parent_element().map(Node::from)
        }
    }

    fn computed_style(&self, element: &Node) -> Result<Option<ComputedStyle>, HostError> {
        let Some(element) = element.dyn_ref::<Element>() else {
            return Ok(None);
        };
        let Some(decl) = self
            .window
            .get_computed_style(element)
            .map_err(|e| HostError(describe(&e)))?
        else {
            return Ok(None);
        };
        let read = |property: &str| {
            decl.get_property_value(property)
                .map_err(|e| HostError(describe(&e)))
        };
        Ok(Some(ComputedStyle {
            font_family: read("font-family")?,
            font_weight: read("font-weight")?,
            font_size: read("font-size")?,
            color: read("color")?,
        }))
    }

    fn is_within_overlay(&self, node: &Node) -> bool {
        self.element_for(node)
            .and_then(|n| n.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&self.overlay_selector).ok().flatten())
            .is_some()
    }
}

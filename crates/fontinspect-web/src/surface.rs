#![forbid(unsafe_code)]

//! DOM materialization of an [`OverlayView`].
//!
//! The element is a cache of the last view. Every [`OverlaySurface::show`]
//! rebuilds the children and rebinds the field listeners; dropping the old
//! [`EventListener`]s detaches them.

use std::collections::HashMap;

use fontinspect_core::overlay::{CONTAINED_EVENTS, FieldKind, OverlayField, OverlayView};
use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement};

const VISIBLE_CLASS: &str = "fi-visible";
const COPIED_TEXT: &str = "Copied!";

/// The singleton overlay element plus its bindings.
pub struct OverlaySurface {
    document: Document,
    overlay_id: String,
    root: Option<HtmlElement>,
    root_listeners: Vec<EventListener>,
    field_listeners: Vec<EventListener>,
    fields: HashMap<FieldKind, HtmlElement>,
    acks: HashMap<u64, Element>,
}

impl OverlaySurface {
    #[must_use]
    pub fn new(document: Document, overlay_id: &str) -> Self {
        Self {
            document,
            overlay_id: overlay_id.to_owned(),
            root: None,
            root_listeners: Vec::new(),
            field_listeners: Vec::new(),
            fields: HashMap::new(),
            acks: HashMap::new(),
        }
    }

    /// Mount on first use. Pointer and click events inside the overlay never
    /// reach the page-level listeners.
    fn mount(&mut self) -> Result<HtmlElement, JsValue> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        let root: HtmlElement = match self.document.get_element_by_id(&self.overlay_id) {
            Some(existing) => existing.dyn_into()?,
            None => {
                let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
                el.set_id(&self.overlay_id);
                self.document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has no body"))?
                    .append_child(&el)?;
                el
            }
        };
        for event in CONTAINED_EVENTS {
            self.root_listeners
                .push(EventListener::new(&root, event, |e: &Event| {
                    e.stop_propagation();
                }));
        }
        self.root = Some(root.clone());
        Ok(root)
    }

    /// Replace content, position, and show.
    pub fn show<F>(&mut self, view: &OverlayView, on_click: F) -> Result<(), JsValue>
    where
        F: Fn(FieldKind) + Clone + 'static,
    {
        let root = self.mount()?;
        self.field_listeners.clear();
        self.fields.clear();
        self.acks.clear();
        root.set_text_content(None);

        for (index, field) in view.fields.iter().enumerate() {
            if index > 0 {
                let divider = self.document.create_element("div")?;
                divider.set_class_name("fi-divider");
                root.append_child(&divider)?;
            }
            let item = self.build_field(field)?;
            root.append_child(&item)?;

            let kind = field.kind;
            let on_click = on_click.clone();
            self.field_listeners
                .push(EventListener::new(&item, "click", move |e: &Event| {
                    e.stop_propagation();
                    on_click(kind);
                }));
            self.fields.insert(kind, item);
        }

        let style = root.style();
        style.set_property("top", &format!("{}px", view.position.top))?;
        style.set_property("left", &format!("{}px", view.position.left))?;
        root.class_list().add_1(VISIBLE_CLASS)?;
        Ok(())
    }

    fn build_field(&self, field: &OverlayField) -> Result<HtmlElement, JsValue> {
        let item: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        item.set_class_name("fi-item");
        item.set_title(&field.title);
        item.set_attribute("data-field", field.kind.as_str())?;

        if let Some(prefix) = field.prefix {
            let span = self.document.create_element("span")?;
            span.set_class_name("fi-prefix");
            span.set_text_content(Some(prefix));
            item.append_child(&span)?;
        }
        if let Some(fill) = &field.swatch {
            let swatch: HtmlElement = self.document.create_element("span")?.dyn_into()?;
            swatch.set_class_name("fi-color-circle");
            swatch.style().set_property("background-color", fill)?;
            item.append_child(&swatch)?;
        }
        let value = self.document.create_element("span")?;
        value.set_class_name("fi-value");
        value.set_text_content(Some(&field.text));
        item.append_child(&value)?;
        Ok(item)
    }

    pub fn hide(&mut self) -> Result<(), JsValue> {
        match &self.root {
            Some(root) => root.class_list().remove_1(VISIBLE_CLASS),
            None => Ok(()),
        }
    }

    /// Attach a "copied" acknowledgment to `field`.
    pub fn show_copied(&mut self, field: FieldKind, ack: u64) -> Result<(), JsValue> {
        let Some(item) = self.fields.get(&field) else {
            return Ok(());
        };
        let tip = self.document.create_element("div")?;
        tip.set_class_name("fi-copied-tip");
        tip.set_text_content(Some(COPIED_TEXT));
        item.style().set_property("position", "relative")?;
        item.append_child(&tip)?;
        self.acks.insert(ack, tip);
        Ok(())
    }

    /// Remove an acknowledgment. Unknown ids (content already replaced) are
    /// ignored.
    pub fn remove_copied(&mut self, ack: u64) {
        if let Some(tip) = self.acks.remove(&ack) {
            tip.remove();
        }
    }

    /// Detach listeners and remove the element.
    pub fn unmount(&mut self) {
        self.field_listeners.clear();
        self.root_listeners.clear();
        self.fields.clear();
        self.acks.clear();
        if let Some(root) = self.root.take() {
            root.remove();
        }
    }
}

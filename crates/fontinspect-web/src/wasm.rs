#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fontinspect_core::input::{Key, PointerInput};
use fontinspect_core::logging::LOG_TARGET;
use fontinspect_core::panel::{AUTO_OPEN_KEY, PanelNavigator};
use fontinspect_core::settings::SettingsStore;
use fontinspect_core::{InspectorConfig, PageInput};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent};

use crate::console;
use crate::dom::describe;
use crate::runtime::Runtime;
use crate::storage::ChromeStorage;

const HIDDEN_CLASS: &str = "hidden";

fn parse_options(options: Option<JsValue>) -> Result<InspectorConfig, JsValue> {
    let json = match options {
        Some(value) if !value.is_undefined() && !value.is_null() => {
            String::from(js_sys::JSON::stringify(&value)?)
        }
        _ => String::from("null"),
    };
    InspectorConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Selection-driven font inspector for the current page.
///
/// Construct once per document. Options are a plain object with any of
/// `debounce_ms`, `ack_ms`, `panel_width`, `panel_height`, `vertical_offset`,
/// `edge_margin`, `enabled_key`, `overlay_id`, `debug`.
#[wasm_bindgen]
pub struct FontInspector {
    runtime: Option<Rc<Runtime>>,
    storage: Option<Rc<ChromeStorage>>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl FontInspector {
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<JsValue>) -> Result<FontInspector, JsValue> {
        let config = parse_options(options)?;
        console::init(config.debug);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let enabled_key = config.enabled_key.clone();
        let runtime = Runtime::new(window, document.clone(), config);

        let storage = ChromeStorage::connect(&[enabled_key.as_str()]);
        let weak = Rc::downgrade(&runtime);
        storage.subscribe(Box::new(move |key, value| {
            dispatch(
                &weak,
                PageInput::SettingChanged {
                    key: key.to_owned(),
                    value: value.cloned(),
                },
            );
        }));

        let weak = Rc::downgrade(&runtime);
        let mouseup = EventListener::new(&document, "mouseup", move |e: &Event| {
            let Some(runtime) = weak.upgrade() else {
                return;
            };
            let within = runtime.page().target_within_overlay(e.target());
            let pointer = if within {
                PointerInput::up().on_overlay()
            } else {
                PointerInput::up()
            };
            runtime.dispatch(PageInput::Pointer(pointer));
        });

        let weak = Rc::downgrade(&runtime);
        let mousedown = EventListener::new(&document, "mousedown", move |e: &Event| {
            let Some(runtime) = weak.upgrade() else {
                return;
            };
            let within = runtime.page().target_within_overlay(e.target());
            let pointer = if within {
                PointerInput::down().on_overlay()
            } else {
                PointerInput::down()
            };
            runtime.dispatch(PageInput::Pointer(pointer));
        });

        let weak = Rc::downgrade(&runtime);
        let keydown = EventListener::new(&document, "keydown", move |e: &Event| {
            let Some(event) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            dispatch(&weak, PageInput::KeyDown(Key::from_dom(&event.key())));
        });

        tracing::info!(target: LOG_TARGET, "font inspector attached");
        Ok(Self {
            runtime: Some(runtime),
            storage: Some(storage),
            listeners: vec![mouseup, mousedown, keydown],
        })
    }

    /// Whether the inspector currently reacts to selections.
    pub fn enabled(&self) -> bool {
        self.runtime.as_ref().is_some_and(|r| r.is_enabled())
    }

    /// Detach all listeners, clear timers and remove the overlay.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.storage = None;
        if let Some(runtime) = self.runtime.take() {
            runtime.teardown();
        }
    }
}

fn dispatch(runtime: &Weak<Runtime>, input: PageInput) {
    if let Some(runtime) = runtime.upgrade() {
        runtime.dispatch(input);
    }
}

/// Navigation for the extension popup: list, detail and settings views.
#[wasm_bindgen]
pub struct SnippetPanel {
    list: Element,
    detail: Element,
    settings: Element,
    nav: Rc<RefCell<PanelNavigator>>,
    storage: Rc<ChromeStorage>,
    feedback_timer: RefCell<Option<Timeout>>,
}

#[wasm_bindgen]
impl SnippetPanel {
    #[wasm_bindgen(constructor)]
    pub fn new(list: Element, detail: Element, settings: Element) -> SnippetPanel {
        console::init(false);
        let panel = Self {
            list,
            detail,
            settings,
            nav: Rc::new(RefCell::new(PanelNavigator::new())),
            storage: ChromeStorage::connect(&[AUTO_OPEN_KEY]),
            feedback_timer: RefCell::new(None),
        };
        panel.sync();
        panel
    }

    #[wasm_bindgen(js_name = showList)]
    pub fn show_list(&self) {
        self.nav.borrow_mut().show_list();
        self.sync();
    }

    #[wasm_bindgen(js_name = showDetail)]
    pub fn show_detail(&self, id: String) {
        self.nav.borrow_mut().show_detail(id);
        self.sync();
    }

    /// Switch to settings; returns the current `autoOpen` value.
    #[wasm_bindgen(js_name = showSettings)]
    pub fn show_settings(&self) -> bool {
        let auto_open = self.nav.borrow_mut().show_settings(&*self.storage);
        self.sync();
        auto_open
    }

    #[wasm_bindgen(js_name = setAutoOpen)]
    pub fn set_auto_open(&self, enabled: bool) -> Result<(), JsValue> {
        self.nav
            .borrow()
            .set_auto_open(&*self.storage, enabled)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = currentView)]
    pub fn current_view(&self) -> String {
        self.nav.borrow().view().name().to_owned()
    }

    /// Show "Copied!" on `button`, restoring its label afterwards.
    #[wasm_bindgen(js_name = flashCopied)]
    pub fn flash_copied(&self, button: Element) {
        let resting = if self.nav.borrow().feedback().is_active() {
            // Keep the label captured by the first trigger.
            button.get_attribute("data-resting-label").unwrap_or_default()
        } else {
            let label = button.text_content().unwrap_or_default();
            if let Err(err) = button.set_attribute("data-resting-label", &label) {
                tracing::warn!(target: LOG_TARGET, error = %describe(&err), "label stash failed");
            }
            label
        };
        let (id, delay) = self.nav.borrow_mut().feedback_mut().trigger();
        button.set_text_content(Some(self.nav.borrow().feedback().label(&resting)));

        let nav = Rc::downgrade(&self.nav);
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || {
            let Some(nav) = nav.upgrade() else {
                return;
            };
            if nav.borrow_mut().feedback_mut().expire(id) {
                button.set_text_content(Some(&resting));
                if let Err(err) = button.remove_attribute("data-resting-label") {
                    tracing::warn!(target: LOG_TARGET, error = %describe(&err), "label stash cleanup failed");
                }
            }
        });
        // Replacing a pending handle clears it; the superseded id would be
        // rejected by `expire` anyway.
        *self.feedback_timer.borrow_mut() = Some(timeout);
    }

    fn sync(&self) {
        let active = self.nav.borrow().view().name();
        for (name, element) in [
            ("list", &self.list),
            ("detail", &self.detail),
            ("settings", &self.settings),
        ] {
            let result = element
                .class_list()
                .toggle_with_force(HIDDEN_CLASS, name != active);
            if let Err(err) = result {
                tracing::warn!(target: LOG_TARGET, view = name, error = %describe(&err), "view toggle failed");
            }
        }
    }
}

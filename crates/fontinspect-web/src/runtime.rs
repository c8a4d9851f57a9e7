//! Effect executor for the content script.
//!
//! Owns the controller, the DOM page, the overlay surface and the live
//! timers. Inputs go through [`Runtime::dispatch`]: the controller is
//! borrowed only for `handle`, then each effect runs with no controller
//! borrow held, so effects that call back into `dispatch` are fine.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use fontinspect_core::clipboard::ClipboardError;
use fontinspect_core::logging::LOG_TARGET;
use fontinspect_core::schedule::TimerToken;
use fontinspect_core::{Effect, InspectorConfig, PageInput, SelectionController};
use gloo::timers::callback::Timeout;
use web_sys::{Document, Window};

use crate::clipboard;
use crate::dom::{DomPage, describe};
use crate::surface::OverlaySurface;

/// Live `setTimeout` handles keyed by token. Dropping a [`Timeout`] clears it.
#[derive(Default)]
struct TimerTable {
    live: HashMap<TimerToken, Timeout>,
    // Handles whose callback is running; dropped on the next fire.
    spent: Vec<Timeout>,
}

impl TimerTable {
    fn insert(&mut self, token: TimerToken, timeout: Timeout) {
        self.live.insert(token, timeout);
    }

    fn cancel(&mut self, token: TimerToken) {
        self.live.remove(&token);
    }

    fn retire(&mut self, token: TimerToken) {
        self.spent.clear();
        if let Some(timeout) = self.live.remove(&token) {
            self.spent.push(timeout);
        }
    }

    fn clear(&mut self) {
        self.live.clear();
    }
}

pub struct Runtime {
    controller: RefCell<SelectionController>,
    page: DomPage,
    surface: RefCell<OverlaySurface>,
    timers: RefCell<TimerTable>,
}

impl Runtime {
    #[must_use]
    pub fn new(window: Window, document: Document, config: InspectorConfig) -> Rc<Self> {
        let page = DomPage::new(window, document.clone(), &config.overlay_id);
        let surface = OverlaySurface::new(document, &config.overlay_id);
        Rc::new(Self {
            controller: RefCell::new(SelectionController::new(config)),
            page,
            surface: RefCell::new(surface),
            timers: RefCell::new(TimerTable::default()),
        })
    }

    #[must_use]
    pub fn page(&self) -> &DomPage {
        &self.page
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.controller.borrow().is_enabled()
    }

    /// Feed one input to the controller and execute its effects.
    pub fn dispatch(self: &Rc<Self>, input: PageInput) {
        if let PageInput::TimerFired(token) = &input {
            self.timers.borrow_mut().retire(*token);
        }
        let effects = match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.handle(input, &self.page),
            Err(_) => {
                tracing::error!(target: LOG_TARGET, ?input, "re-entrant dispatch dropped");
                return;
            }
        };
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(self: &Rc<Self>, effect: Effect) {
        match effect {
            Effect::ScheduleTimer { token, delay } => {
                let weak = Rc::downgrade(self);
                let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
                let timeout = Timeout::new(millis, move || {
                    dispatch_weak(&weak, PageInput::TimerFired(token));
                });
                self.timers.borrow_mut().insert(token, timeout);
            }
            Effect::CancelTimer(token) => self.timers.borrow_mut().cancel(token),
            Effect::ShowOverlay(view) => {
                let weak = Rc::downgrade(self);
                let on_click = move |field| dispatch_weak(&weak, PageInput::FieldClicked(field));
                if let Err(err) = self.surface.borrow_mut().show(&view, on_click) {
                    tracing::error!(target: LOG_TARGET, error = %describe(&err), "overlay show failed");
                }
            }
            Effect::HideOverlay => {
                if let Err(err) = self.surface.borrow_mut().hide() {
                    tracing::error!(target: LOG_TARGET, error = %describe(&err), "overlay hide failed");
                }
            }
            Effect::WriteClipboard { field, text } => {
                let weak = Rc::downgrade(self);
                wasm_bindgen_futures::spawn_local(async move {
                    let result: Result<(), ClipboardError> = clipboard::write_text(&text).await;
                    dispatch_weak(&weak, PageInput::CopyFinished { field, result });
                });
            }
            Effect::ShowCopied { field, ack } => {
                if let Err(err) = self.surface.borrow_mut().show_copied(field, ack) {
                    tracing::warn!(target: LOG_TARGET, error = %describe(&err), "copied tip failed");
                }
            }
            Effect::RemoveCopied { ack } => self.surface.borrow_mut().remove_copied(ack),
        }
    }

    /// Clear timers and remove the overlay.
    pub fn teardown(&self) {
        self.timers.borrow_mut().clear();
        self.surface.borrow_mut().unmount();
    }
}

fn dispatch_weak(runtime: &Weak<Runtime>, input: PageInput) {
    if let Some(runtime) = runtime.upgrade() {
        runtime.dispatch(input);
    }
}

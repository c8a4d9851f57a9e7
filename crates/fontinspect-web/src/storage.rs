//! [`SettingsStore`] over `chrome.storage.local`.
//!
//! The extension API is asynchronous, so the store keeps a local cache:
//! filled by an initial `get`, kept current by `chrome.storage.onChanged`
//! (area `"local"` only). Subscribers are notified from those two callbacks;
//! `set` writes through and lets `onChanged` deliver the notification.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fontinspect_core::logging::LOG_TARGET;
use fontinspect_core::settings::{SettingsError, SettingsListener, SettingsStore};
use js_sys::Function;
use serde_json::{Map, Value};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::describe;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = get, catch)]
    fn local_get(keys: &JsValue, callback: &Function) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = set, catch)]
    fn local_set(items: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "onChanged"], js_name = addListener, catch)]
    fn on_changed_add(callback: &Function) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "onChanged"], js_name = removeListener, catch)]
    fn on_changed_remove(callback: &Function) -> Result<(), JsValue>;
}

fn to_json(value: &JsValue) -> Option<Value> {
    let text = js_sys::JSON::stringify(value).ok()?;
    serde_json::from_str(&String::from(text)).ok()
}

fn to_js(value: &Value) -> Result<JsValue, SettingsError> {
    let text =
        serde_json::to_string(value).map_err(|e| SettingsError::Serialization(e.to_string()))?;
    js_sys::JSON::parse(&text).map_err(|e| SettingsError::Serialization(describe(&e)))
}

type ChangedCallback = Closure<dyn FnMut(JsValue, JsValue)>;

/// Cached view of `chrome.storage.local`.
pub struct ChromeStorage {
    cache: RefCell<Map<String, Value>>,
    listeners: RefCell<Vec<SettingsListener>>,
    on_changed: RefCell<Option<ChangedCallback>>,
}

impl ChromeStorage {
    /// Subscribe to changes and start loading `keys`.
    ///
    /// Outside an extension context the store stays empty and every `get`
    /// returns its default.
    pub fn connect(keys: &[&str]) -> Rc<Self> {
        let store = Rc::new(Self {
            cache: RefCell::new(Map::new()),
            listeners: RefCell::new(Vec::new()),
            on_changed: RefCell::new(None),
        });

        let weak = Rc::downgrade(&store);
        let callback: ChangedCallback = Closure::new(move |changes: JsValue, area: JsValue| {
            if let Some(store) = weak.upgrade() {
                store.apply_changes(&changes, &area);
            }
        });
        match on_changed_add(callback.as_ref().unchecked_ref()) {
            Ok(()) => *store.on_changed.borrow_mut() = Some(callback),
            Err(err) => {
                tracing::warn!(target: LOG_TARGET, error = %describe(&err), "chrome.storage.onChanged unavailable");
            }
        }

        let keys: js_sys::Array = keys.iter().map(|k| JsValue::from_str(k)).collect();
        let weak: Weak<Self> = Rc::downgrade(&store);
        let loaded = Closure::once_into_js(move |items: JsValue| {
            if let Some(store) = weak.upgrade() {
                store.apply_loaded(&items);
            }
        });
        if let Err(err) = local_get(&keys, loaded.unchecked_ref()) {
            tracing::warn!(target: LOG_TARGET, error = %describe(&err), "chrome.storage.local unavailable");
        }
        store
    }

    fn apply_loaded(&self, items: &JsValue) {
        let Some(Value::Object(items)) = to_json(items) else {
            return;
        };
        for (key, value) in items {
            self.cache.borrow_mut().insert(key.clone(), value.clone());
            self.notify(&key, Some(&value));
        }
    }

    fn apply_changes(&self, changes: &JsValue, area: &JsValue) {
        if area.as_string().as_deref() != Some("local") {
            return;
        }
        let Some(Value::Object(changes)) = to_json(changes) else {
            return;
        };
        for (key, change) in changes {
            let new_value = change.get("newValue").cloned();
            match &new_value {
                Some(value) => {
                    self.cache.borrow_mut().insert(key.clone(), value.clone());
                }
                None => {
                    self.cache.borrow_mut().remove(&key);
                }
            }
            self.notify(&key, new_value.as_ref());
        }
    }

    fn notify(&self, key: &str, value: Option<&Value>) {
        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for listener in &mut listeners {
            listener(key, value);
        }
        let mut slot = self.listeners.borrow_mut();
        listeners.append(&mut slot);
        *slot = listeners;
    }
}

impl SettingsStore for ChromeStorage {
    fn name(&self) -> &str {
        "chrome.storage.local"
    }

    fn get(&self, key: &str, default: Value) -> Value {
        self.cache.borrow().get(key).cloned().unwrap_or(default)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut items = Map::new();
        items.insert(key.to_owned(), value.clone());
        let items = to_js(&Value::Object(items))?;
        local_set(&items).map_err(|e| SettingsError::Unavailable(describe(&e)))?;
        self.cache.borrow_mut().insert(key.to_owned(), value);
        Ok(())
    }

    fn subscribe(&self, listener: SettingsListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

impl Drop for ChromeStorage {
    fn drop(&mut self) {
        if let Some(callback) = self.on_changed.get_mut().take() {
            let _ = on_changed_remove(callback.as_ref().unchecked_ref());
        }
    }
}

#![forbid(unsafe_code)]

//! The persistent settings boundary.
//!
//! A key-value store with JSON values and change notification. The inspector
//! only reads the enabled flag; the companion panel also writes `autoOpen`.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Missing key | `get` returns the caller's default |
//! | Backend unreachable | `set` returns [`SettingsError::Unavailable`], cache unaffected |
//! | Value not serializable | `set` returns [`SettingsError::Serialization`] |

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Errors raised by settings backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Backend is not reachable from this context.
    Unavailable(String),
    /// Value could not be encoded for the backend.
    Serialization(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "settings unavailable: {msg}"),
            Self::Serialization(msg) => write!(f, "settings serialization error: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Callback invoked with `(key, new_value)`; `None` means the key was removed.
pub type SettingsListener = Box<dyn FnMut(&str, Option<&Value>)>;

/// Key-value settings with change notification.
pub trait SettingsStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Read `key`, falling back to `default` when absent.
    fn get(&self, key: &str, default: Value) -> Value;

    /// Write `key`. Subscribers are notified of the change.
    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError>;

    /// Register a change listener for every key.
    fn subscribe(&self, listener: SettingsListener);
}

/// Interpret a stored enabled flag: anything but JSON `false` is enabled.
#[must_use]
pub fn flag_enabled(value: Option<&Value>) -> bool {
    !matches!(value, Some(Value::Bool(false)))
}

/// In-memory settings store for tests and native hosts.
#[derive(Default)]
pub struct MemorySettings {
    data: RefCell<HashMap<String, Value>>,
    listeners: RefCell<Vec<SettingsListener>>,
}

impl fmt::Debug for MemorySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySettings")
            .field("data", &self.data)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl MemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    #[must_use]
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            data: RefCell::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            listeners: RefCell::default(),
        }
    }

    /// Remove `key`, notifying subscribers.
    pub fn remove(&self, key: &str) {
        let removed = self.data.borrow_mut().remove(key);
        if removed.is_some() {
            self.notify(key, None);
        }
    }

    fn notify(&self, key: &str, value: Option<&Value>) {
        // Listeners may call back into the store.
        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for listener in &mut listeners {
            listener(key, value);
        }
        let mut slot = self.listeners.borrow_mut();
        listeners.append(&mut slot);
        *slot = listeners;
    }
}

impl SettingsStore for MemorySettings {
    fn name(&self) -> &str {
        "MemorySettings"
    }

    fn get(&self, key: &str, default: Value) -> Value {
        self.data.borrow().get(key).cloned().unwrap_or(default)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.data.borrow_mut().insert(key.to_owned(), value.clone());
        self.notify(key, Some(&value));
        Ok(())
    }

    fn subscribe(&self, listener: SettingsListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::rc::Rc;

    #[test]
    fn get_falls_back_to_default() {
        let store = MemorySettings::new();
        assert_eq!(store.get("fi_enabled", json!(true)), json!(true));
    }

    #[test]
    fn set_then_get() {
        let store = MemorySettings::new();
        store.set("fi_enabled", json!(false)).expect("set");
        assert_eq!(store.get("fi_enabled", json!(true)), json!(false));
    }

    #[test]
    fn subscribers_see_changes_and_removals() {
        let store = MemorySettings::with_entries([("fi_enabled", json!(true))]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(Box::new(move |key, value| {
            sink.borrow_mut().push((key.to_owned(), value.cloned()));
        }));

        store.set("fi_enabled", json!(false)).expect("set");
        store.remove("fi_enabled");
        store.remove("fi_enabled");

        assert_eq!(
            *seen.borrow(),
            vec![
                ("fi_enabled".to_owned(), Some(json!(false))),
                ("fi_enabled".to_owned(), None),
            ]
        );
    }

    #[test]
    fn listener_may_subscribe_reentrantly() {
        let store = Rc::new(MemorySettings::new());
        let inner = Rc::clone(&store);
        store.subscribe(Box::new(move |_, _| {
            inner.subscribe(Box::new(|_, _| {}));
        }));
        store.set("k", json!(1)).expect("set");
        assert_eq!(store.listeners.borrow().len(), 2);
    }

    #[test]
    fn only_explicit_false_disables() {
        assert!(flag_enabled(None));
        assert!(flag_enabled(Some(&json!(true))));
        assert!(flag_enabled(Some(&json!("false"))));
        assert!(flag_enabled(Some(&Value::Null)));
        assert!(!flag_enabled(Some(&json!(false))));
    }
}

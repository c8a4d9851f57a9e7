#![forbid(unsafe_code)]

//! Companion panel navigation.
//!
//! The popup shows one of three views: the snippet list, a snippet's detail,
//! or settings. Snippet storage and rendering live outside this crate; this
//! module only tracks which view is active, the `autoOpen` setting, and the
//! detail view's transient "Copied!" button label.

use core::time::Duration;

use serde_json::Value;

use crate::schedule::AckIds;
use crate::settings::{SettingsError, SettingsStore};

/// Settings key for opening the panel automatically.
pub const AUTO_OPEN_KEY: &str = "autoOpen";

/// Label shown on the copy button while the acknowledgment is active.
pub const COPIED_LABEL: &str = "Copied!";

/// Identifier of a saved snippet, as assigned by the snippet store.
pub type SnippetId = String;

/// The active panel view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PanelView {
    List,
    Detail(SnippetId),
    Settings,
}

impl PanelView {
    /// Stable name for hosts (`"list"`, `"detail"`, `"settings"`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail(_) => "detail",
            Self::Settings => "settings",
        }
    }
}

/// Transient "Copied!" state of the detail view's copy button.
#[derive(Debug, Clone)]
pub struct CopyButtonFeedback {
    duration: Duration,
    active: Option<u64>,
    ids: AckIds,
}

impl Default for CopyButtonFeedback {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl CopyButtonFeedback {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: None,
            ids: AckIds::default(),
        }
    }

    /// Start (or restart) the acknowledgment. Returns the id to pass to
    /// [`expire`](Self::expire) after the returned delay.
    pub fn trigger(&mut self) -> (u64, Duration) {
        let id = self.ids.next_id();
        self.active = Some(id);
        (id, self.duration)
    }

    /// End the acknowledgment started by `id`. Returns `false` when a later
    /// trigger superseded it.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The label to show given the button's resting label.
    #[must_use]
    pub fn label<'a>(&self, resting: &'a str) -> &'a str {
        if self.is_active() { COPIED_LABEL } else { resting }
    }
}

/// View navigation for the companion panel.
#[derive(Debug, Clone)]
pub struct PanelNavigator {
    view: PanelView,
    feedback: CopyButtonFeedback,
}

impl Default for PanelNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelNavigator {
    /// Start on the list view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: PanelView::List,
            feedback: CopyButtonFeedback::default(),
        }
    }

    #[must_use]
    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn show_list(&mut self) {
        self.view = PanelView::List;
    }

    pub fn show_detail(&mut self, id: impl Into<SnippetId>) {
        self.view = PanelView::Detail(id.into());
    }

    /// Switch to settings and return the current `autoOpen` value.
    pub fn show_settings<S: SettingsStore + ?Sized>(&mut self, store: &S) -> bool {
        self.view = PanelView::Settings;
        auto_open(store)
    }

    /// Persist a new `autoOpen` value.
    pub fn set_auto_open<S: SettingsStore + ?Sized>(
        &self,
        store: &S,
        enabled: bool,
    ) -> Result<(), SettingsError> {
        crate::debug!(target: crate::logging::LOG_TARGET, enabled, "autoOpen changed");
        store.set(AUTO_OPEN_KEY, Value::Bool(enabled))
    }

    #[must_use]
    pub fn feedback(&self) -> &CopyButtonFeedback {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut CopyButtonFeedback {
        &mut self.feedback
    }
}

/// Read `autoOpen`, defaulting to `true` when absent or not a boolean.
#[must_use]
pub fn auto_open<S: SettingsStore + ?Sized>(store: &S) -> bool {
    store
        .get(AUTO_OPEN_KEY, Value::Bool(true))
        .as_bool()
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;
    use serde_json::json;

    #[test]
    fn starts_on_list() {
        assert_eq!(PanelNavigator::new().view(), &PanelView::List);
    }

    #[test]
    fn detail_and_back() {
        let mut nav = PanelNavigator::new();
        nav.show_detail("clip-7");
        assert_eq!(nav.view(), &PanelView::Detail("clip-7".into()));
        assert_eq!(nav.view().name(), "detail");
        nav.show_list();
        assert_eq!(nav.view(), &PanelView::List);
    }

    #[test]
    fn settings_reads_auto_open_with_default() {
        let store = MemorySettings::new();
        let mut nav = PanelNavigator::new();
        assert!(nav.show_settings(&store));
        assert_eq!(nav.view(), &PanelView::Settings);

        nav.set_auto_open(&store, false).expect("set");
        assert!(!nav.show_settings(&store));
        assert_eq!(store.get(AUTO_OPEN_KEY, json!(null)), json!(false));
    }

    #[test]
    fn copy_feedback_restores_after_expiry() {
        let mut feedback = CopyButtonFeedback::default();
        assert_eq!(feedback.label("Copy"), "Copy");

        let (id, delay) = feedback.trigger();
        assert_eq!(delay, Duration::from_millis(1500));
        assert_eq!(feedback.label("Copy"), "Copied!");

        assert!(feedback.expire(id));
        assert_eq!(feedback.label("Copy"), "Copy");
    }

    #[test]
    fn stale_expiry_does_not_cut_short_a_retrigger() {
        let mut feedback = CopyButtonFeedback::default();
        let (first, _) = feedback.trigger();
        let (second, _) = feedback.trigger();
        assert!(!feedback.expire(first));
        assert!(feedback.is_active());
        assert!(feedback.expire(second));
        assert!(!feedback.is_active());
    }
}

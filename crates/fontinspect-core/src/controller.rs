#![forbid(unsafe_code)]

//! The selection controller.
//!
//! An Elm-style state machine: the host feeds [`PageInput`] values to
//! [`SelectionController::handle`] and executes the returned [`Effect`]s.
//! The controller owns the [`AppContext`] (enabled flag plus the overlay
//! singleton) and is its only writer.
//!
//! # States
//!
//! ```text
//!            pointer-up (enabled, outside overlay)
//!   ┌──────┐ ─────────────────────────────────────▶ ┌─────────┐
//!   │ IDLE │                                        │ PENDING │
//!   └──────┘ ◀──── timer fires, nothing selected ── └─────────┘
//!      ▲                                                 │
//!      │ pointer-down / Escape / disabled                │ timer fires, selection
//!      │                                                 ▼
//!      └──────────────────────────────────────────── ┌─────────┐
//!                                                    │ VISIBLE │
//!                                                    └─────────┘
//! ```
//!
//! # Invariants
//!
//! 1. No `ShowOverlay` is emitted while the enabled flag is false.
//! 2. `HideOverlay` is emitted only when the overlay is visible.
//! 3. A selection timer that was superseded or cancelled never shows the
//!    overlay: the generation, the enabled flag, and the selection are all
//!    re-checked when it fires.
//! 4. Style resolution failures hide the overlay; they never propagate.

use core::time::Duration;

use serde_json::Value;

use crate::clipboard::ClipboardError;
use crate::config::InspectorConfig;
use crate::input::{Key, PointerInput, PointerPhase};
use crate::overlay::{FieldKind, OverlayState, OverlayView, render};
use crate::page::Page;
use crate::position::place;
use crate::schedule::{AckIds, Debounce, TimerToken};
use crate::settings::{SettingsStore, flag_enabled};
use crate::style::resolve_style;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing shown, nothing pending.
    Idle,
    /// A debounced selection read is scheduled.
    Pending,
    /// The overlay is showing.
    Visible,
}

/// Input delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PageInput {
    /// `mousedown` / `mouseup` on the page.
    Pointer(PointerInput),
    /// `keydown` on the page.
    KeyDown(Key),
    /// A settings key changed; `None` means it was removed.
    SettingChanged { key: String, value: Option<Value> },
    /// A timer scheduled through [`Effect::ScheduleTimer`] fired.
    TimerFired(TimerToken),
    /// An overlay field was clicked.
    FieldClicked(FieldKind),
    /// Outcome of an [`Effect::WriteClipboard`].
    CopyFinished {
        field: FieldKind,
        result: Result<(), ClipboardError>,
    },
}

/// Side effect requested from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start a one-shot timer; report it back as [`PageInput::TimerFired`].
    ScheduleTimer { token: TimerToken, delay: Duration },
    /// Clear a timer that has not fired yet. Best-effort.
    CancelTimer(TimerToken),
    /// Mount (if needed), replace content, position and show the overlay.
    ShowOverlay(OverlayView),
    /// Hide the overlay.
    HideOverlay,
    /// Write `text` to the clipboard; report back with
    /// [`PageInput::CopyFinished`].
    WriteClipboard { field: FieldKind, text: String },
    /// Attach a "copied" acknowledgment to a field.
    ShowCopied { field: FieldKind, ack: u64 },
    /// Remove a previously attached acknowledgment.
    RemoveCopied { ack: u64 },
}

/// Process-wide state shared by the inspector components.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: InspectorConfig,
    enabled: bool,
    overlay: OverlayState,
}

impl AppContext {
    #[must_use]
    pub fn new(config: InspectorConfig, enabled: bool) -> Self {
        Self {
            config,
            enabled,
            overlay: OverlayState::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }
}

/// Selection-driven inspector state machine.
#[derive(Debug, Clone)]
pub struct SelectionController {
    ctx: AppContext,
    phase: Phase,
    debounce: Debounce,
    acks: AckIds,
}

impl SelectionController {
    /// Create a controller. The flag starts enabled until settings say
    /// otherwise.
    #[must_use]
    pub fn new(config: InspectorConfig) -> Self {
        Self::with_context(AppContext::new(config, true))
    }

    /// Create a controller with the enabled flag read from `store`.
    #[must_use]
    pub fn load<S: SettingsStore + ?Sized>(config: InspectorConfig, store: &S) -> Self {
        let stored = store.get(&config.enabled_key, Value::Bool(true));
        let enabled = flag_enabled(Some(&stored));
        crate::debug!(target: crate::logging::LOG_TARGET, store = store.name(), enabled, "loaded enabled flag");
        Self::with_context(AppContext::new(config, enabled))
    }

    #[must_use]
    pub fn with_context(ctx: AppContext) -> Self {
        Self {
            ctx,
            phase: Phase::Idle,
            debounce: Debounce::new(),
            acks: AckIds::default(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.ctx.enabled
    }

    #[must_use]
    pub fn overlay(&self) -> &OverlayState {
        &self.ctx.overlay
    }

    /// Process one input and return the effects to execute, in order.
    pub fn handle<P: Page>(&mut self, input: PageInput, page: &P) -> Vec<Effect> {
        let mut effects = Vec::new();
        match input {
            PageInput::Pointer(pointer) => self.on_pointer(pointer, &mut effects),
            PageInput::KeyDown(key) => {
                if key.is_escape() {
                    self.dismiss(&mut effects);
                }
            }
            PageInput::SettingChanged { key, value } => {
                if key == self.ctx.config.enabled_key {
                    self.set_enabled(flag_enabled(value.as_ref()), &mut effects);
                }
            }
            PageInput::TimerFired(TimerToken::Selection(generation)) => {
                self.on_selection_timer(generation, page, &mut effects);
            }
            PageInput::TimerFired(TimerToken::Ack(ack)) => {
                effects.push(Effect::RemoveCopied { ack });
            }
            PageInput::FieldClicked(field) => self.on_field_clicked(field, &mut effects),
            PageInput::CopyFinished { field, result } => {
                self.on_copy_finished(field, result, &mut effects);
            }
        }
        effects
    }

    /// Apply a new enabled flag directly (e.g. from an initial async load).
    pub fn set_enabled(&mut self, enabled: bool, effects: &mut Vec<Effect>) {
        if self.ctx.enabled != enabled {
            crate::info!(target: crate::logging::LOG_TARGET, enabled, "inspector toggled");
        }
        self.ctx.enabled = enabled;
        if !enabled {
            self.dismiss(effects);
        }
    }

    fn on_pointer(&mut self, pointer: PointerInput, effects: &mut Vec<Effect>) {
        if pointer.within_overlay {
            return;
        }
        match pointer.phase {
            PointerPhase::Down => self.dismiss(effects),
            PointerPhase::Up => {
                if !self.ctx.enabled {
                    return;
                }
                let (token, superseded) = self.debounce.schedule();
                if let Some(stale) = superseded {
                    effects.push(Effect::CancelTimer(stale));
                }
                effects.push(Effect::ScheduleTimer {
                    token,
                    delay: self.ctx.config.debounce(),
                });
                self.phase = Phase::Pending;
            }
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn on_selection_timer<P: Page>(
        &mut self,
        generation: u64,
        page: &P,
        effects: &mut Vec<Effect>,
    ) {
        if !self.debounce.fire(generation) {
            crate::trace!(target: crate::logging::LOG_TARGET, generation, "stale selection timer ignored");
            return;
        }
        if !self.ctx.enabled {
            self.dismiss(effects);
            return;
        }

        let Some(snapshot) = page.selection().filter(|s| s.has_text()) else {
            self.dismiss(effects);
            return;
        };
        if page.is_within_overlay(&snapshot.source_node) {
            self.settle();
            return;
        }

        let facts = match resolve_style(page, &snapshot.source_node) {
            Ok(facts) => facts,
            Err(err) => {
                crate::warn!(target: crate::logging::LOG_TARGET, error = %err, "style resolution failed");
                self.dismiss(effects);
                return;
            }
        };

        let placement = place(
            &snapshot.anchor_rect,
            &page.viewport(),
            &self.ctx.config.positioner(),
        );
        let view = render(&facts, placement);
        crate::debug!(
            target: crate::logging::LOG_TARGET,
            family = %facts.font_family,
            weight = %facts.font_weight.raw(),
            size = %facts.font_size_px,
            color = %facts.color_hex,
            "inspected selection"
        );
        self.ctx.overlay.show(view.clone());
        effects.push(Effect::ShowOverlay(view));
        self.phase = Phase::Visible;
    }

    fn on_field_clicked(&mut self, field: FieldKind, effects: &mut Vec<Effect>) {
        if !self.ctx.overlay.is_visible() {
            return;
        }
        let Some(item) = self.ctx.overlay.view().and_then(|view| view.field(field)) else {
            return;
        };
        effects.push(Effect::WriteClipboard {
            field,
            text: item.copy_value.clone(),
        });
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn on_copy_finished(
        &mut self,
        field: FieldKind,
        result: Result<(), ClipboardError>,
        effects: &mut Vec<Effect>,
    ) {
        if let Err(err) = result {
            crate::error!(target: crate::logging::LOG_TARGET, field = field.as_str(), error = %err, "copy failed");
            return;
        }
        crate::debug!(target: crate::logging::LOG_TARGET, field = field.as_str(), "copied");
        if !self.ctx.overlay.is_visible() {
            return;
        }
        let ack = self.acks.next_id();
        effects.push(Effect::ShowCopied { field, ack });
        effects.push(Effect::ScheduleTimer {
            token: TimerToken::Ack(ack),
            delay: self.ctx.config.ack_duration(),
        });
    }

    /// Force IDLE: retire any pending read and hide a visible overlay.
    fn dismiss(&mut self, effects: &mut Vec<Effect>) {
        if let Some(token) = self.debounce.cancel() {
            effects.push(Effect::CancelTimer(token));
        }
        if self.ctx.overlay.hide() {
            effects.push(Effect::HideOverlay);
        }
        self.phase = Phase::Idle;
    }

    /// Return to whichever resting state matches the overlay.
    fn settle(&mut self) {
        self.phase = if self.ctx.overlay.is_visible() {
            Phase::Visible
        } else {
            Phase::Idle
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{AnchorRect, Viewport};
    use crate::page::{ComputedStyle, HostError, SelectionSnapshot};
    use pretty_assertions::assert_eq;

    /// Single-element page: node 0 is a text node inside element 1.
    struct StaticPage {
        selection: Option<SelectionSnapshot<u32>>,
    }

    impl StaticPage {
        fn with_text(text: &str) -> Self {
            Self {
                selection: Some(SelectionSnapshot {
                    text: text.to_owned(),
                    anchor_rect: AnchorRect::new(300.0, 400.0, 60.0, 18.0),
                    source_node: 0,
                }),
            }
        }

        fn empty() -> Self {
            Self { selection: None }
        }
    }

    impl Page for StaticPage {
        type Node = u32;

        fn selection(&self) -> Option<SelectionSnapshot<u32>> {
            self.selection.clone()
        }

        fn viewport(&self) -> Viewport {
            Viewport::new(1280.0, 800.0)
        }

        fn element_for(&self, node: &u32) -> Option<u32> {
            match node {
                0 | 1 => Some(1),
                _ => None,
            }
        }

        fn computed_style(&self, _element: &u32) -> Result<Option<ComputedStyle>, HostError> {
            Ok(Some(ComputedStyle {
                font_family: "Arial".into(),
                font_weight: "700".into(),
                font_size: "16px".into(),
                color: "rgb(0, 0, 0)".into(),
            }))
        }

        fn is_within_overlay(&self, node: &u32) -> bool {
            *node >= 100
        }
    }

    fn controller() -> SelectionController {
        SelectionController::new(InspectorConfig::default())
    }

    fn pointer_up(ctl: &mut SelectionController, page: &StaticPage) -> TimerToken {
        let effects = ctl.handle(PageInput::Pointer(PointerInput::up()), page);
        match effects.last() {
            Some(Effect::ScheduleTimer { token, .. }) => *token,
            other => panic!("expected a scheduled timer, got {other:?}"),
        }
    }

    #[test]
    fn pointer_up_schedules_debounce() {
        let mut ctl = controller();
        let effects = ctl.handle(PageInput::Pointer(PointerInput::up()), &StaticPage::empty());
        assert_eq!(
            effects,
            vec![Effect::ScheduleTimer {
                token: TimerToken::Selection(1),
                delay: Duration::from_millis(10),
            }]
        );
        assert_eq!(ctl.phase(), Phase::Pending);
    }

    #[test]
    fn timer_with_selection_shows_overlay() {
        let page = StaticPage::with_text("Hello");
        let mut ctl = controller();
        let token = pointer_up(&mut ctl, &page);
        let effects = ctl.handle(PageInput::TimerFired(token), &page);
        assert!(matches!(effects.as_slice(), [Effect::ShowOverlay(_)]));
        assert_eq!(ctl.phase(), Phase::Visible);
        assert!(ctl.overlay().is_visible());
    }

    #[test]
    fn timer_without_selection_goes_idle() {
        let page = StaticPage::empty();
        let mut ctl = controller();
        let token = pointer_up(&mut ctl, &page);
        assert_eq!(ctl.handle(PageInput::TimerFired(token), &page), vec![]);
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn whitespace_selection_is_nothing() {
        let page = StaticPage::with_text("  \n ");
        let mut ctl = controller();
        let token = pointer_up(&mut ctl, &page);
        assert_eq!(ctl.handle(PageInput::TimerFired(token), &page), vec![]);
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn selection_inside_overlay_does_not_retrigger() {
        let mut page = StaticPage::with_text("Bold");
        if let Some(selection) = page.selection.as_mut() {
            selection.source_node = 100;
        }
        let mut ctl = controller();
        let token = pointer_up(&mut ctl, &page);
        assert_eq!(ctl.handle(PageInput::TimerFired(token), &page), vec![]);
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn detached_anchor_hides() {
        let mut page = StaticPage::with_text("Hello");
        let mut ctl = controller();
        let token = pointer_up(&mut ctl, &page);
        ctl.handle(PageInput::TimerFired(token), &page);

        if let Some(selection) = page.selection.as_mut() {
            selection.source_node = 7;
        }
        let token = pointer_up(&mut ctl, &page);
        let effects = ctl.handle(PageInput::TimerFired(token), &page);
        assert_eq!(effects, vec![Effect::HideOverlay]);
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn disabled_ignores_pointer_up() {
        let page = StaticPage::with_text("Hello");
        let mut ctl = SelectionController::with_context(AppContext::new(
            InspectorConfig::default(),
            false,
        ));
        assert_eq!(
            ctl.handle(PageInput::Pointer(PointerInput::up()), &page),
            vec![]
        );
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn pointer_events_on_overlay_are_ignored() {
        let page = StaticPage::with_text("Hello");
        let mut ctl = controller();
        let token = pointer_up(&mut ctl, &page);
        ctl.handle(PageInput::TimerFired(token), &page);

        let down = PageInput::Pointer(PointerInput::down().on_overlay());
        assert_eq!(ctl.handle(down, &page), vec![]);
        let up = PageInput::Pointer(PointerInput::up().on_overlay());
        assert_eq!(ctl.handle(up, &page), vec![]);
        assert_eq!(ctl.phase(), Phase::Visible);
    }

    #[test]
    fn other_keys_are_ignored() {
        let page = StaticPage::with_text("Hello");
        let mut ctl = controller();
        let token = pointer_up(&mut ctl, &page);
        ctl.handle(PageInput::TimerFired(token), &page);
        assert_eq!(ctl.handle(PageInput::KeyDown(Key::from_dom("a")), &page), vec![]);
        assert_eq!(ctl.phase(), Phase::Visible);
    }

    #[test]
    fn unrelated_setting_changes_are_ignored() {
        let page = StaticPage::empty();
        let mut ctl = controller();
        let input = PageInput::SettingChanged {
            key: "autoOpen".into(),
            value: Some(Value::Bool(false)),
        };
        assert_eq!(ctl.handle(input, &page), vec![]);
        assert!(ctl.is_enabled());
    }

    #[test]
    fn field_click_without_overlay_is_ignored() {
        let mut ctl = controller();
        let effects = ctl.handle(PageInput::FieldClicked(FieldKind::Family), &StaticPage::empty());
        assert_eq!(effects, vec![]);
    }

    #[test]
    fn ack_timer_removes_acknowledgment() {
        let mut ctl = controller();
        let effects = ctl.handle(
            PageInput::TimerFired(TimerToken::Ack(3)),
            &StaticPage::empty(),
        );
        assert_eq!(effects, vec![Effect::RemoveCopied { ack: 3 }]);
    }
}

#![forbid(unsafe_code)]

//! Host input normalization.
//!
//! Hosts forward DOM events as plain values: pointer events carry whether the
//! event target lies inside the overlay, key events carry the DOM
//! `KeyboardEvent.key` string normalized through [`Key::from_dom`].

use serde::{Deserialize, Serialize};

/// Normalized key for the few keys the inspector reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Other(Box<str>),
}

impl Key {
    /// Normalize a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            // Legacy Edge/IE report "Esc".
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other(key.into()),
        }
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        matches!(self, Self::Escape)
    }
}

/// Pointer phase, mirroring `mousedown` / `mouseup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Up,
}

/// A pointer event as seen by the page-level listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerInput {
    pub phase: PointerPhase,
    /// The event target is the overlay or one of its descendants.
    pub within_overlay: bool,
}

impl PointerInput {
    #[must_use]
    pub const fn down() -> Self {
        Self {
            phase: PointerPhase::Down,
            within_overlay: false,
        }
    }

    #[must_use]
    pub const fn up() -> Self {
        Self {
            phase: PointerPhase::Up,
            within_overlay: false,
        }
    }

    #[must_use]
    pub const fn on_overlay(mut self) -> Self {
        self.within_overlay = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_variants() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert!(Key::from_dom("Escape").is_escape());
    }

    #[test]
    fn non_escape_keys_are_other() {
        assert_eq!(Key::from_dom("a"), Key::Other("a".into()));
        assert_eq!(Key::from_dom("Enter"), Key::Other("Enter".into()));
        assert_eq!(Key::from_dom("ArrowLeft"), Key::Other("ArrowLeft".into()));
        assert!(!Key::from_dom("ArrowLeft").is_escape());
    }

    #[test]
    fn pointer_builders() {
        let input = PointerInput::down().on_overlay();
        assert_eq!(input.phase, PointerPhase::Down);
        assert!(input.within_overlay);
        assert!(!PointerInput::up().within_overlay);
    }
}

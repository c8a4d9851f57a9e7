#![forbid(unsafe_code)]

//! Scheduled tasks with stale-firing protection.
//!
//! The host owns the real timers (`setTimeout`). The core only hands out
//! [`TimerToken`]s and decides, when a token comes back, whether it is still
//! current. A superseded or cancelled token is ignored even if the host
//! failed to clear the underlying timer.
//!
//! # Invariants
//!
//! 1. At most one selection task is pending at a time.
//! 2. [`Debounce::schedule`] and [`Debounce::cancel`] both retire the
//!    previous generation.
//! 3. [`Debounce::fire`] accepts a generation at most once.

use serde::{Deserialize, Serialize};

/// Identifier for a host timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerToken {
    /// Debounced selection read, tagged with its generation.
    Selection(u64),
    /// Removal of a "copied" acknowledgment.
    Ack(u64),
}

/// Latest-wins debounce state.
#[derive(Debug, Clone, Default)]
pub struct Debounce {
    generation: u64,
    pending: Option<u64>,
}

impl Debounce {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }

    /// Open a new window. Returns the token to schedule and the token it
    /// supersedes, if any.
    pub fn schedule(&mut self) -> (TimerToken, Option<TimerToken>) {
        let superseded = self.cancel();
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(self.generation);
        (TimerToken::Selection(self.generation), superseded)
    }

    /// Retire the pending window, returning its token.
    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.pending.take().map(TimerToken::Selection)
    }

    /// Accept a firing for `generation` if it is the pending one.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.pending == Some(generation) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Monotonic id source for acknowledgment timers.
#[derive(Debug, Clone, Default)]
pub struct AckIds {
    next: u64,
}

impl AckIds {
    pub fn next_id(&mut self) -> u64 {
        self.next = self.next.wrapping_add(1);
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_then_fire() {
        let mut debounce = Debounce::new();
        let (token, superseded) = debounce.schedule();
        assert_eq!(superseded, None);
        assert!(debounce.is_pending());
        let TimerToken::Selection(generation) = token else {
            panic!("selection token expected");
        };
        assert!(debounce.fire(generation));
        assert!(!debounce.is_pending());
        assert!(!debounce.fire(generation), "fires at most once");
    }

    #[test]
    fn reschedule_supersedes_previous() {
        let mut debounce = Debounce::new();
        let (first, _) = debounce.schedule();
        let (second, superseded) = debounce.schedule();
        assert_eq!(superseded, Some(first));
        assert_ne!(first, second);
        assert!(!debounce.fire(1));
        assert!(debounce.fire(2));
    }

    #[test]
    fn cancel_retires_pending() {
        let mut debounce = Debounce::new();
        let (token, _) = debounce.schedule();
        assert_eq!(debounce.cancel(), Some(token));
        assert_eq!(debounce.cancel(), None);
        assert!(!debounce.fire(1));
    }

    #[test]
    fn ack_ids_are_unique() {
        let mut ids = AckIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }
}

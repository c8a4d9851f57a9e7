#![forbid(unsafe_code)]

//! Logging support.
//!
//! With the `tracing` feature enabled the level macros re-export `tracing`.
//! Without it, no-op macros keep call sites compiling so the core stays
//! dependency-light for hosts that bring their own diagnostics.

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

/// Target used by every log line emitted from this crate.
pub const LOG_TARGET: &str = "fontinspect";

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op error macro when tracing is disabled.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }
}

#![forbid(unsafe_code)]

//! The clipboard boundary.
//!
//! Writes are best-effort and performed by the host, which reports the
//! outcome with [`PageInput::CopyFinished`](crate::controller::PageInput::CopyFinished).
//! A failure is logged by the controller and otherwise ignored: no retry and
//! no acknowledgment.

use std::fmt;

/// Why a clipboard write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard API is reachable from this context.
    Unavailable,
    /// The host rejected the write (permission, focus, ...).
    Rejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "clipboard unavailable"),
            Self::Rejected(msg) => write!(f, "clipboard write rejected: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_carries_host_message() {
        let err = ClipboardError::Rejected("Document is not focused.".into());
        assert_eq!(
            err.to_string(),
            "clipboard write rejected: Document is not focused."
        );
        assert_eq!(ClipboardError::Unavailable.to_string(), "clipboard unavailable");
    }
}

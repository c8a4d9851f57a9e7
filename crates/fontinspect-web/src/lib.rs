//! WASM content script for Font Inspector.
//!
//! Binds `fontinspect-core` to a live page:
//! - document `mouseup` / `mousedown` / `keydown` listeners,
//! - the overlay element and its click-to-copy fields,
//! - `chrome.storage.local` for the enabled flag,
//! - `navigator.clipboard` for copies,
//! - `tracing` output to the browser console.
//!
//! `SnippetPanel` drives view switching for the extension popup.

pub mod console;

#[cfg(target_arch = "wasm32")]
mod clipboard;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod runtime;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod surface;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{FontInspector, SnippetPanel};

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct FontInspector;

#[cfg(not(target_arch = "wasm32"))]
impl FontInspector {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }

    pub fn enabled(&self) -> bool {
        false
    }

    pub fn destroy(&mut self) {}
}

#![forbid(unsafe_code)]

//! Core: selection-driven typography inspection.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment pushes DOM-derived input and
//!   executes the returned effects. Nothing here touches a real document.
//! - **Deterministic**: timers are tokens the host reports back; no clocks.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.

pub mod clipboard;
pub mod color;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod page;
pub mod panel;
pub mod position;
pub mod schedule;
pub mod settings;
pub mod style;
pub mod weight;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};

pub use config::InspectorConfig;
pub use controller::{AppContext, Effect, PageInput, Phase, SelectionController};
pub use overlay::{FieldKind, OverlayView};
pub use style::StyleFacts;

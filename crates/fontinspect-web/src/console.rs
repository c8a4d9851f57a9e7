#![forbid(unsafe_code)]

//! `tracing` output to the browser console.
//!
//! A `tracing-subscriber` fmt layer renders each event into a
//! [`ConsoleWriter`]; dropping the writer emits the line through the console
//! method matching the event's level. Native builds write to stderr instead.

use std::io;
use std::sync::Once;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Install the global subscriber. Later calls are no-ops.
///
/// `debug` selects DEBUG verbosity; otherwise only warnings and errors are
/// printed.
pub fn init(debug: bool) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let level = if debug { Level::DEBUG } else { Level::WARN };
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(ConsoleMakeWriter)
            .with_ansi(false)
            .without_time()
            .with_target(true)
            .finish();
        // Another subscriber (e.g. the host page's) wins.
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Produces one [`ConsoleWriter`] per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event; emits it on drop.
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::new(),
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// The buffered line without its trailing newline.
    #[must_use]
    pub fn line(&self) -> String {
        String::from_utf8_lossy(&self.buf).trim_end().to_owned()
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            emit(self.level, &self.line());
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(line);
    if level == Level::ERROR {
        console::error_1(&value);
    } else if level == Level::WARN {
        console::warn_1(&value);
    } else if level == Level::INFO {
        console::info_1(&value);
    } else {
        console::debug_1(&value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

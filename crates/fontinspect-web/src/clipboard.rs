//! Best-effort `navigator.clipboard.writeText`.

use fontinspect_core::clipboard::ClipboardError;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom::describe;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    fn write_text_promise(text: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Write `text` to the system clipboard.
///
/// A missing clipboard API maps to [`ClipboardError::Unavailable`]; a
/// rejected promise (permission, document not focused) to
/// [`ClipboardError::Rejected`].
pub async fn write_text(text: &str) -> Result<(), ClipboardError> {
    let promise = write_text_promise(text).map_err(|_| ClipboardError::Unavailable)?;
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError::Rejected(describe(&e)))
}

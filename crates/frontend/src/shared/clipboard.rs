//! Copying text to the system clipboard via the async Clipboard API.

use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Write `text` to the clipboard. Failures are logged and otherwise
/// ignored, like every other browser facility in this crate.
pub fn copy_to_clipboard(text: &str) {
    let text = text.to_owned();
    spawn_local(async move {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            if JsFuture::from(clipboard.write_text(&text)).await.is_err() {
                log::warn!("Clipboard write failed");
            }
        }
    });
}

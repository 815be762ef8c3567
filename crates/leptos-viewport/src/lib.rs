//! Leptos Viewport Utilities
//!
//! Browser glue shared by the dashboard pages: a reactive window width,
//! file downloads from memory, file reads for uploads, localStorage reads.

use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Width used before the window is available (tests, SSR)
const FALLBACK_WIDTH_PX: f64 = 1280.0;

fn window_width() -> f64 {
    web_sys::window()
        .and_then(|win| win.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(FALLBACK_WIDTH_PX)
}

// ========================
// Viewport width
// ========================

/// Window width in CSS pixels, kept current by a global resize listener.
///
/// Call once near the root and share the signal through context; every
/// call binds another listener.
pub fn create_viewport_width() -> ReadSignal<f64> {
    use wasm_bindgen::closure::Closure;

    let (width, set_width) = signal(window_width());

    let on_resize = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        let next = window_width();
        if width.get_untracked() != next {
            set_width.set(next);
        }
    });

    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    }
    on_resize.forget();

    width
}

// ========================
// Downloads
// ========================

/// Save bytes as a file via a temporary object URL and anchor click
pub fn trigger_download(bytes: &[u8], filename: &str, content_type: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).into());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    web_sys::HtmlElement::style(&anchor).set_property("display", "none")?;

    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    web_sys::Url::revoke_object_url(&url)?;

    log::info!("[download] saved {} ({} bytes)", filename, bytes.len());
    Ok(())
}

// ========================
// Uploads
// ========================

/// Read a picked file fully into memory
pub async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

// ========================
// Storage
// ========================

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

/// Read a localStorage key; blank values read as absent
pub fn storage_get(key: &str) -> Option<String> {
    local_storage()
        .and_then(|storage| storage.get_item(key).ok().flatten())
        .filter(|value| !value.trim().is_empty())
}

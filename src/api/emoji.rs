//! JavaScript-facing emoji API
//!
//! JS owns the text buffer and the rendering of inline images. WASM only
//! decides what freshly typed text becomes and where glyph spans go:
//!
//! - `loadCatalog(source, format)` installs the glyph catalog
//! - `filterInsertedText(text)` / `filterInsertedBytes(bytes)` rewrite input
//! - `scanTags(text)` returns all replacement regions
//! - `rescanAndApply(text, apply)` calls `apply(start, end, handle)` per region
//!
//! All offsets are UTF-16 code units, i.e. plain JS string indices.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{js_error, lock_catalog, serialize};
use crate::catalog::{GlyphCatalog, GlyphHandle};
use crate::editor::EmojiFilter;
use crate::{wasm_info, wasm_log, wasm_warn};

/// Run `f` against the loaded catalog, or an empty one if none is loaded
fn with_filter<T>(f: impl FnOnce(&EmojiFilter<&GlyphCatalog>) -> T) -> Result<T, JsValue> {
    let guard = lock_catalog()?;
    let empty = GlyphCatalog::new();
    let catalog = guard.as_ref().unwrap_or(&empty);
    Ok(f(&EmojiFilter::new(catalog)))
}

/// Parse and install a glyph catalog; returns the number of keys
#[wasm_bindgen(js_name = loadCatalog)]
pub fn load_catalog(source: &str, format: &str) -> Result<usize, JsValue> {
    let catalog = GlyphCatalog::from_str_with_format(source, format)
        .map_err(|e| js_error("loadCatalog failed", e))?;
    let count = catalog.len();

    *lock_catalog()? = Some(catalog);
    wasm_info!("loadCatalog: {} glyph keys ({})", count, format);
    Ok(count)
}

/// Drop the installed catalog
#[wasm_bindgen(js_name = clearCatalog)]
pub fn clear_catalog() -> Result<(), JsValue> {
    *lock_catalog()? = None;
    Ok(())
}

/// `"[hex]"` for a resolvable first character, `undefined` to insert as-is
#[wasm_bindgen(js_name = filterInsertedText)]
pub fn filter_inserted_text(text: &str) -> Result<Option<String>, JsValue> {
    with_filter(|filter| filter.filter_inserted_text(text.as_bytes()))
}

/// Same as `filterInsertedText`, for raw UTF-8 bytes
#[wasm_bindgen(js_name = filterInsertedBytes)]
pub fn filter_inserted_bytes(bytes: &[u8]) -> Result<Option<String>, JsValue> {
    with_filter(|filter| filter.filter_inserted_text(bytes))
}

/// All resolved tags in `text` as `[{start, end, key, handle}]`
#[wasm_bindgen(js_name = scanTags)]
pub fn scan_tags(text: &str) -> Result<JsValue, JsValue> {
    let regions = with_filter(|filter| filter.scan(text))?;
    wasm_log!("scanTags: {} regions in {} bytes", regions.len(), text.len());
    serialize(&regions, "scanTags serialization failed")
}

/// Rescan `text` and call `apply(start, end, handle)` for every region
///
/// A callback that throws is logged and skipped; the remaining regions are
/// still applied. Returns the number of regions found.
#[wasm_bindgen(js_name = rescanAndApply)]
pub fn rescan_and_apply(text: &str, apply: &js_sys::Function) -> Result<usize, JsValue> {
    let mut call_host = |start: usize, end: usize, handle: &GlyphHandle| {
        let handle_js = match serialize(handle, "rescanAndApply handle serialization failed") {
            Ok(value) => value,
            Err(_) => return,
        };
        let result = apply.call3(
            &JsValue::NULL,
            &JsValue::from(start as u32),
            &JsValue::from(end as u32),
            &handle_js,
        );
        if let Err(e) = result {
            wasm_warn!("rescanAndApply: callback failed for {}..{}: {:?}", start, end, e);
        }
    };

    with_filter(|filter| filter.rescan_and_apply(text, &mut call_host))
}

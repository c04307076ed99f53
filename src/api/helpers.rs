//! Shared helpers for WASM API operations
//!
//! Boundary logging macros, serialization to `JsValue`, and access to the
//! module-wide glyph catalog.

use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::catalog::GlyphCatalog;

// Catalog loaded by JS; `None` until `loadCatalog` succeeds
lazy_static! {
    static ref CATALOG: Mutex<Option<GlyphCatalog>> = Mutex::new(None);
}

// ============================================================================
// Logging Macros
// ============================================================================
//
// JS-facing calls log under the `emoji_wasm` target so the browser console
// (via `console_log`) can tell them apart from core scanner traces.

pub const LOG_TARGET: &str = "emoji_wasm";

/// Debug-level trace of a JS-facing call
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        log::debug!(target: $crate::api::helpers::LOG_TARGET, $($arg)*)
    };
}

/// Info-level message, e.g. catalog (re)loads
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        log::info!(target: $crate::api::helpers::LOG_TARGET, $($arg)*)
    };
}

/// Recoverable problem at the JS boundary (throwing callback, ...)
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        log::warn!(target: $crate::api::helpers::LOG_TARGET, $($arg)*)
    };
}

/// Error about to be returned to JS as a rejected `JsValue`
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        log::error!(target: $crate::api::helpers::LOG_TARGET, $($arg)*)
    };
}

// ============================================================================
// Serialization / Error Helpers
// ============================================================================

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| js_error(error_context, e))
}

/// Convert any displayable error to a logged `JsValue`
pub fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    let msg = format!("{}: {}", context, err);
    crate::wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}

// ============================================================================
// Catalog Access
// ============================================================================

pub fn lock_catalog() -> Result<MutexGuard<'static, Option<GlyphCatalog>>, JsValue> {
    CATALOG
        .lock()
        .map_err(|e| js_error("Catalog lock poisoned", e))
}

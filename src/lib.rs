//! Emoji Tag Editor WASM Module
//!
//! Detects `[hex]` emoji placeholders in editable text and maps each to a
//! glyph resource, so a text surface can draw inline pictograms instead of
//! raw code points while the user types.
//!
//! - `encode`: code point → lookup key
//! - `scan`: buffer → ordered, non-overlapping replacement regions
//! - `catalog`: lookup key → glyph handle
//! - `editor`: input filter and rescan surfaces for a host text widget
//! - `api`: wasm-bindgen exports for JavaScript

pub mod error;
pub mod encode;
pub mod scan;
pub mod catalog;
pub mod editor;
pub mod api;

// Re-export commonly used types
pub use catalog::{CatalogConfig, GlyphAlign, GlyphCatalog, GlyphHandle, ResourceCatalog};
pub use editor::{EmojiFilter, SpanApplier, SpannedText, TextChangeSource};
pub use encode::{encode, encode_all, LookupKey};
pub use error::{CatalogError, DecodeError, ResolveError};
pub use scan::{scan, scan_str, ReplacementRegion, Tag, TagScanner};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("Emoji tag editor WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        wasm_warn!("logger already initialized");
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}

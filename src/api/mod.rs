//! Emoji editor WASM API
//!
//! JavaScript-facing surface of the crate.
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, serialization, catalog access
//! - `emoji`: catalog loading, input filtering and tag rescanning

pub mod helpers;
pub mod emoji;

pub use emoji::{
    clear_catalog, filter_inserted_bytes, filter_inserted_text, load_catalog, rescan_and_apply,
    scan_tags,
};

//! Error types for key encoding, resource resolution and catalog loading
//!
//! None of these reach the filter or rescan surfaces: those degrade every
//! failure to "no substitution". They stay visible on the lower-level
//! functions so callers can tell the cases apart.

use thiserror::Error;

/// Raw input bytes could not be decoded as UTF-8
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid UTF-8 after {valid_up_to} bytes")]
    InvalidUtf8 { valid_up_to: usize },
}

/// A lookup key did not produce a glyph handle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Well-formed hex key with no resource behind it
    #[error("no resource for key '{0}'")]
    Unknown(String),

    /// Key is not a lowercase hex code point (e.g. contains a nested '[')
    #[error("malformed key '{0}'")]
    Malformed(String),

    /// The catalog itself failed while looking the key up
    #[error("lookup failed for key '{key}': {reason}")]
    Lookup { key: String, reason: String },
}

/// Catalog configuration could not be loaded
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported catalog format '{0}' (expected yaml or json)")]
    UnsupportedFormat(String),
}

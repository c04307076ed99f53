//! Glyph resource catalog
//!
//! Maps a `LookupKey` to a renderable glyph handle. The scanner and the input
//! filter only ever query a catalog; they never change it.
//!
//! `GlyphCatalog` is the concrete catalog used by the WASM module. Resources
//! are named `resource_prefix + key` (`emoji_1f600` by default) and sized to a
//! square of `glyph_size` pixels, normally the line height of the text surface.
//!
//! Catalogs are loaded from YAML or JSON:
//!
//! ```yaml
//! resource_prefix: emoji_
//! glyph_size: 20
//! align: bottom
//! keys: [1f600, 1f601, "2600"]
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::encode::LookupKey;
use crate::error::{CatalogError, ResolveError};

pub const DEFAULT_RESOURCE_PREFIX: &str = "emoji_";
pub const DEFAULT_GLYPH_SIZE: u32 = 20;

/// Source of glyph handles for lookup keys
pub trait ResourceCatalog {
    type Handle;

    fn resolve(&self, key: &LookupKey) -> Result<Self::Handle, ResolveError>;

    /// `resolve` with every failure folded into `None`
    fn lookup(&self, key: &LookupKey) -> Option<Self::Handle> {
        match self.resolve(key) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::debug!("resolve: {}", e);
                None
            }
        }
    }
}

impl<C: ResourceCatalog + ?Sized> ResourceCatalog for &C {
    type Handle = C::Handle;

    fn resolve(&self, key: &LookupKey) -> Result<Self::Handle, ResolveError> {
        (**self).resolve(key)
    }
}

impl<H: Clone> ResourceCatalog for HashMap<String, H> {
    type Handle = H;

    fn resolve(&self, key: &LookupKey) -> Result<H, ResolveError> {
        self.get(key.as_str())
            .cloned()
            .ok_or_else(|| ResolveError::Unknown(key.to_string()))
    }
}

/// Vertical placement of a glyph relative to the text line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphAlign {
    #[default]
    Bottom,
    Baseline,
}

/// Everything the host needs to draw one inline glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphHandle {
    pub key: LookupKey,
    /// Resource name, e.g. `emoji_1f600`
    pub resource: String,
    /// Edge length of the square glyph in pixels
    pub size: u32,
    pub align: GlyphAlign,
}

fn default_prefix() -> String {
    DEFAULT_RESOURCE_PREFIX.to_string()
}

fn default_glyph_size() -> u32 {
    DEFAULT_GLYPH_SIZE
}

/// Serialized catalog description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_prefix")]
    pub resource_prefix: String,

    #[serde(default = "default_glyph_size")]
    pub glyph_size: u32,

    #[serde(default)]
    pub align: GlyphAlign,

    #[serde(default, deserialize_with = "deserialize_keys")]
    pub keys: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            resource_prefix: default_prefix(),
            glyph_size: default_glyph_size(),
            align: GlyphAlign::default(),
            keys: Vec::new(),
        }
    }
}

/// Accept keys written as strings or as bare YAML integers (`2600`)
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKey {
        Text(String),
        Number(u64),
    }

    let raw = Vec::<RawKey>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|k| match k {
            RawKey::Text(s) => s,
            RawKey::Number(n) => n.to_string(),
        })
        .collect())
}

/// Catalog of known emoji glyphs
#[derive(Debug, Clone)]
pub struct GlyphCatalog {
    resource_prefix: String,
    glyph_size: u32,
    align: GlyphAlign,
    keys: BTreeSet<String>,
}

impl GlyphCatalog {
    /// Empty catalog with default naming and sizing
    pub fn new() -> Self {
        Self::from_config(CatalogConfig::default())
    }

    pub fn from_config(config: CatalogConfig) -> Self {
        let mut catalog = Self {
            resource_prefix: config.resource_prefix,
            glyph_size: config.glyph_size,
            align: config.align,
            keys: BTreeSet::new(),
        };
        for key in config.keys {
            catalog.insert(&key);
        }
        catalog
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_yaml::from_str(source)?;
        Ok(Self::from_config(config))
    }

    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_json::from_str(source)?;
        Ok(Self::from_config(config))
    }

    /// Parse `source` as `"yaml"`/`"yml"` or `"json"`
    pub fn from_str_with_format(source: &str, format: &str) -> Result<Self, CatalogError> {
        match format.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Self::from_yaml_str(source),
            "json" => Self::from_json_str(source),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Load a catalog file, choosing the parser from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        let source = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&source, &format)
    }

    /// Builder: add keys
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.insert(key.as_ref());
        }
        self
    }

    pub fn with_glyph_size(mut self, size: u32) -> Self {
        self.glyph_size = size;
        self
    }

    pub fn with_align(mut self, align: GlyphAlign) -> Self {
        self.align = align;
        self
    }

    fn insert(&mut self, key: &str) {
        let key = key.to_lowercase();
        if !LookupKey::from(key.as_str()).is_hex() {
            log::warn!("Catalog key '{}' is not a hex code point", key);
        }
        self.keys.insert(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn resource_name(&self, key: &LookupKey) -> String {
        format!("{}{}", self.resource_prefix, key)
    }

    pub fn glyph_size(&self) -> u32 {
        self.glyph_size
    }
}

impl Default for GlyphCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceCatalog for GlyphCatalog {
    type Handle = GlyphHandle;

    fn resolve(&self, key: &LookupKey) -> Result<GlyphHandle, ResolveError> {
        // Literal lookup first: a catalog may define any key text
        if self.keys.contains(key.as_str()) {
            return Ok(GlyphHandle {
                key: key.clone(),
                resource: self.resource_name(key),
                size: self.glyph_size,
                align: self.align,
            });
        }

        if key.is_hex() {
            Err(ResolveError::Unknown(key.to_string()))
        } else {
            Err(ResolveError::Malformed(key.to_string()))
        }
    }
}

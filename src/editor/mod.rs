//! Host integration surfaces
//!
//! The text surface itself (widget, rendering, change events) lives outside
//! this crate. It talks to the core through three narrow seams:
//!
//! - `TextChangeSource`: hands the current buffer content to the scanner
//! - `SpanApplier`: receives one call per resolved region
//! - `ResourceCatalog`: resolves lookup keys (see `crate::catalog`)
//!
//! `EmojiFilter` ties them together into the two operations a host calls:
//! `filter_inserted_text` before new text lands in the buffer, and
//! `rescan_and_apply` after every change.

pub mod spanned;

use std::borrow::Cow;

use crate::catalog::ResourceCatalog;
use crate::encode::encode;
use crate::scan::{scan, ReplacementRegion};

pub use spanned::{AppliedSpan, Patch, SpannedText};

/// Buffer content as UTF-16 code units, matching the host's indexing
pub trait TextChangeSource {
    fn text_units(&self) -> Cow<'_, [u16]>;
}

impl TextChangeSource for str {
    fn text_units(&self) -> Cow<'_, [u16]> {
        Cow::Owned(self.encode_utf16().collect())
    }
}

impl TextChangeSource for String {
    fn text_units(&self) -> Cow<'_, [u16]> {
        self.as_str().text_units()
    }
}

impl TextChangeSource for [u16] {
    fn text_units(&self) -> Cow<'_, [u16]> {
        Cow::Borrowed(self)
    }
}

/// Receiver for resolved regions
///
/// The host replaces the visible range `start..end` with the glyph for
/// `handle`. Ranges are in UTF-16 code units.
pub trait SpanApplier<H> {
    /// Drop spans from a previous scan; called once before each rescan
    fn clear_spans(&mut self) {}

    fn apply_span(&mut self, start: usize, end: usize, handle: &H);
}

impl<H, F> SpanApplier<H> for F
where
    F: FnMut(usize, usize, &H),
{
    fn apply_span(&mut self, start: usize, end: usize, handle: &H) {
        self(start, end, handle)
    }
}

/// Input filter and rescan driver over a resource catalog
#[derive(Debug, Clone, Default)]
pub struct EmojiFilter<C> {
    catalog: C,
}

impl<C: ResourceCatalog> EmojiFilter<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn into_catalog(self) -> C {
        self.catalog
    }

    /// Rewrite freshly inserted text into its `[hex]` tag
    ///
    /// Returns `None` when the text should be inserted unchanged: empty or
    /// invalid input, or a first code point with no glyph. Only the first
    /// code point is considered; when it resolves the whole insertion is
    /// replaced by its tag.
    pub fn filter_inserted_text(&self, raw: &[u8]) -> Option<String> {
        if raw.is_empty() {
            return None;
        }

        let key = encode(raw)?;
        self.catalog.lookup(&key)?;

        let tag = key.to_tag();
        log::debug!("filter: inserting {} for {} bytes", tag, raw.len());
        Some(tag)
    }

    /// Resolved regions of the whole buffer, in order
    pub fn scan<S>(&self, source: &S) -> Vec<ReplacementRegion<C::Handle>>
    where
        S: TextChangeSource + ?Sized,
    {
        let units = source.text_units();
        scan(&units, |key| self.catalog.lookup(key))
    }

    /// Rescan the whole buffer and hand every region to `applier`
    ///
    /// Returns the number of spans applied. The buffer itself is never
    /// modified.
    pub fn rescan_and_apply<S, A>(&self, source: &S, applier: &mut A) -> usize
    where
        S: TextChangeSource + ?Sized,
        A: SpanApplier<C::Handle>,
    {
        let regions = self.scan(source);

        applier.clear_spans();
        for region in &regions {
            applier.apply_span(region.start, region.end, &region.handle);
        }

        log::debug!("rescan: applied {} spans", regions.len());
        regions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GlyphCatalog, GlyphHandle};

    fn filter() -> EmojiFilter<GlyphCatalog> {
        EmojiFilter::new(GlyphCatalog::new().with_keys(["1f600", "1f601"]))
    }

    #[test]
    fn test_filter_known_emoji() {
        assert_eq!(
            filter().filter_inserted_text("😀".as_bytes()),
            Some("[1f600]".to_string())
        );
    }

    #[test]
    fn test_filter_passthrough() {
        let f = filter();
        assert_eq!(f.filter_inserted_text(b"a"), None);
        assert_eq!(f.filter_inserted_text(b""), None);
        assert_eq!(f.filter_inserted_text(&[0xC3]), None);
    }

    #[test]
    fn test_filter_multi_code_point_uses_first() {
        let f = filter();
        assert_eq!(
            f.filter_inserted_text("😀x".as_bytes()),
            Some("[1f600]".to_string())
        );
        assert_eq!(f.filter_inserted_text("x😀".as_bytes()), None);
    }

    #[test]
    fn test_rescan_with_closure() {
        let mut applied = Vec::new();
        let mut record = |start: usize, end: usize, handle: &GlyphHandle| {
            applied.push((start, end, handle.resource.clone()));
        };
        let count = filter().rescan_and_apply("hi [1f600] [zz] [1f601]", &mut record);

        assert_eq!(count, 2);
        assert_eq!(
            applied,
            vec![
                (3, 10, "emoji_1f600".to_string()),
                (16, 23, "emoji_1f601".to_string()),
            ]
        );
    }

    #[test]
    fn test_rescan_empty_buffer() {
        let mut calls = 0;
        let mut count_calls = |_: usize, _: usize, _: &GlyphHandle| calls += 1;
        let count = filter().rescan_and_apply("", &mut count_calls);
        assert_eq!(count, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_filtered_text_scans_back() {
        let f = filter();
        let tag = f.filter_inserted_text("😁".as_bytes()).unwrap();
        let regions = f.scan(tag.as_str());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].key.as_str(), "1f601");
    }
}

//! In-memory spanned text
//!
//! A minimal host for the filter and rescan surfaces: a string plus the glyph
//! spans currently laid over it. Every edit runs the input filter on inserted
//! text, splices the buffer, then rescans the whole content.
//!
//! Positions are UTF-16 code units, like a browser `<textarea>`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::{EmojiFilter, SpanApplier, TextChangeSource};
use crate::catalog::ResourceCatalog;

/// A text mutation: replace `start..end` with `replacement`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Patch {
    /// Start of replaced range (inclusive)
    pub start: usize,
    /// End of replaced range (exclusive), in the text before the edit
    pub end: usize,
    /// Text that was actually inserted (after filtering)
    pub replacement: String,
    /// Cursor position after the edit
    pub new_cursor: usize,
}

impl Patch {
    pub fn replace(start: usize, end: usize, replacement: String) -> Self {
        let new_cursor = start + replacement.encode_utf16().count();
        Patch {
            start,
            end,
            replacement,
            new_cursor,
        }
    }
}

/// A glyph span laid over the text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AppliedSpan<H> {
    pub start: usize,
    pub end: usize,
    pub handle: H,
}

/// Text buffer with inline glyph spans
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SpannedText<H> {
    text: String,
    spans: Vec<AppliedSpan<H>>,
}

impl<H> Default for SpannedText<H> {
    fn default() -> Self {
        Self {
            text: String::new(),
            spans: Vec::new(),
        }
    }
}

impl<H: Clone> SpannedText<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing text; spans stay empty until `refresh`
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[AppliedSpan<H>] {
        &self.spans
    }

    /// Length in UTF-16 code units
    pub fn len(&self) -> usize {
        self.text.encode_utf16().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert raw bytes at `at`, rewriting them to a tag when they resolve
    pub fn insert<C>(&mut self, at: usize, raw: &[u8], filter: &EmojiFilter<C>) -> Patch
    where
        C: ResourceCatalog<Handle = H>,
    {
        self.replace_range(at, at, raw, filter)
    }

    /// Replace `start..end` with raw bytes, running the input filter first
    ///
    /// Offsets are clamped to the buffer. Bytes that neither resolve nor
    /// decode as UTF-8 are inserted lossily.
    pub fn replace_range<C>(
        &mut self,
        start: usize,
        end: usize,
        raw: &[u8],
        filter: &EmojiFilter<C>,
    ) -> Patch
    where
        C: ResourceCatalog<Handle = H>,
    {
        let replacement = match filter.filter_inserted_text(raw) {
            Some(tag) => tag,
            None => String::from_utf8_lossy(raw).into_owned(),
        };

        let len = self.len();
        let start = start.min(len);
        let end = end.clamp(start, len);

        // Offsets inside a surrogate pair move to the end of that code point
        let (byte_start, start) = boundary(&self.text, start);
        let (byte_end, end) = boundary(&self.text, end);
        self.text.replace_range(byte_start..byte_end, &replacement);

        self.refresh(filter);
        Patch::replace(start, end, replacement)
    }

    /// Delete `start..end`; a collapsed range deletes the code point before it
    pub fn delete_range<C>(&mut self, start: usize, end: usize, filter: &EmojiFilter<C>) -> Patch
    where
        C: ResourceCatalog<Handle = H>,
    {
        let (start, end) = if start == end {
            let (_, cursor) = boundary(&self.text, start);
            (previous_boundary(&self.text, cursor), cursor)
        } else {
            (start, end)
        };
        self.replace_range(start, end, &[], filter)
    }

    /// Rescan the whole buffer and replace the current spans
    pub fn refresh<C>(&mut self, filter: &EmojiFilter<C>) -> usize
    where
        C: ResourceCatalog<Handle = H>,
    {
        let units: Vec<u16> = self.text.encode_utf16().collect();
        filter.rescan_and_apply(units.as_slice(), self)
    }
}

impl<H> TextChangeSource for SpannedText<H> {
    fn text_units(&self) -> Cow<'_, [u16]> {
        self.text.text_units()
    }
}

impl<H: Clone> SpanApplier<H> for SpannedText<H> {
    fn clear_spans(&mut self) {
        self.spans.clear();
    }

    fn apply_span(&mut self, start: usize, end: usize, handle: &H) {
        self.spans.push(AppliedSpan {
            start,
            end,
            handle: handle.clone(),
        });
    }
}

/// `(byte, unit)` offsets of the first code point boundary at or after
/// UTF-16 offset `unit`
fn boundary(text: &str, unit: usize) -> (usize, usize) {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        if units >= unit {
            return (idx, units);
        }
        units += ch.len_utf16();
    }
    (text.len(), units)
}

/// UTF-16 offset of the start of the code point ending at boundary `unit`
fn previous_boundary(text: &str, unit: usize) -> usize {
    let mut units = 0;
    for ch in text.chars() {
        let next = units + ch.len_utf16();
        if next >= unit {
            return units;
        }
        units = next;
    }
    units
}

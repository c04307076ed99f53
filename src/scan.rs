//! Tag scanner
//!
//! Single left-to-right pass over a text buffer that finds `[hex]` tags and
//! turns the ones whose key resolves into replacement regions.
//!
//! ## States
//! - Scanning: outside any tag, waiting for `[`
//! - InTag: inside an open tag, accumulating its text until `]`
//!
//! Offsets are UTF-16 code unit indices so they line up with the string
//! indexing of a JavaScript (or Java) host. The delimiters are ASCII, so a
//! surrogate pair inside a tag is accumulated like any other content.
//!
//! Every call rescans the whole buffer from offset 0; nothing is cached.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::encode::{LookupKey, TAG_CLOSE, TAG_OPEN};

const OPEN_UNIT: u16 = TAG_OPEN as u16;
const CLOSE_UNIT: u16 = TAG_CLOSE as u16;

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any tag
    Scanning,
    /// Inside a tag opened at `start`; a further `[` is ordinary content
    InTag { start: usize },
}

/// A closed `[...]` tag found in the buffer, resolved or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Offset of the opening `[`
    pub start: usize,
    /// Offset one past the closing `]`
    pub end: usize,
    /// Text strictly between the delimiters
    pub key: LookupKey,
}

impl Tag {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length including both delimiters, so always at least 2
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// A resolved tag, ready for visual substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRegion<H> {
    pub start: usize,
    pub end: usize,
    pub key: LookupKey,
    pub handle: H,
}

impl<H> ReplacementRegion<H> {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Iterator over every closed tag in a UTF-16 buffer
///
/// An unterminated trailing tag is dropped without error.
pub struct TagScanner<'a> {
    units: &'a [u16],
    pos: usize,
    state: ScanState,
}

impl<'a> TagScanner<'a> {
    pub fn new(units: &'a [u16]) -> Self {
        Self {
            units,
            pos: 0,
            state: ScanState::Scanning,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// `None` when the key holds a lone surrogate; such a tag never resolves
    fn close_tag(&self, start: usize, close_pos: usize) -> Option<Tag> {
        // Tag text is `[` + key + `]`; trim one unit from each side
        let tag_units = &self.units[start..=close_pos];
        let key_units = &tag_units[1..tag_units.len() - 1];
        let end = close_pos + 1;

        let key = match String::from_utf16(key_units) {
            Ok(key) => key,
            Err(e) => {
                log::debug!("Tag at {}..{} skipped: {}", start, end, e);
                return None;
            }
        };

        log::debug!(
            "Tag: '{}' started at: {}, finished at {}, length: {}",
            key,
            start,
            end,
            end - start
        );

        Some(Tag {
            start,
            end,
            key: LookupKey::from(key),
        })
    }
}

impl Iterator for TagScanner<'_> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        while self.pos < self.units.len() {
            let position = self.pos;
            let unit = self.units[position];
            self.pos += 1;

            match self.state {
                ScanState::Scanning => {
                    if unit == OPEN_UNIT {
                        log::debug!("Entering tag at {}", position);
                        self.state = ScanState::InTag { start: position };
                    }
                }
                ScanState::InTag { start } => {
                    if unit == CLOSE_UNIT {
                        self.state = ScanState::Scanning;
                        if let Some(tag) = self.close_tag(start, position) {
                            return Some(tag);
                        }
                    }
                }
            }
        }

        if let ScanState::InTag { start } = self.state {
            log::debug!("Unterminated tag at {} ignored", start);
            self.state = ScanState::Scanning;
        }
        None
    }
}

/// Find every tag in `units` whose key resolves
///
/// `resolve` returning `None` (unknown key, malformed key, failed lookup)
/// leaves the tag as literal text. Regions come back ordered by start offset
/// and never overlap.
pub fn scan<H, F>(units: &[u16], mut resolve: F) -> Vec<ReplacementRegion<H>>
where
    F: FnMut(&LookupKey) -> Option<H>,
{
    if units.is_empty() {
        return Vec::new();
    }

    TagScanner::new(units)
        .filter_map(|tag| {
            let handle = resolve(&tag.key)?;
            Some(ReplacementRegion {
                start: tag.start,
                end: tag.end,
                key: tag.key,
                handle,
            })
        })
        .collect()
}

/// [`scan`] over a Rust string, with offsets in UTF-16 code units
pub fn scan_str<H, F>(text: &str, resolve: F) -> Vec<ReplacementRegion<H>>
where
    F: FnMut(&LookupKey) -> Option<H>,
{
    let units: Vec<u16> = text.encode_utf16().collect();
    scan(&units, resolve)
}

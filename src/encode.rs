//! Code point to lookup key encoding
//!
//! Turns freshly typed text (raw UTF-8 bytes) into the lowercase hex key that
//! names a glyph resource and forms the payload of a `[hex]` tag.
//!
//! - `decode_code_points(bytes)` → every code point, or `DecodeError`
//! - `encode_all(bytes)` → one `LookupKey` per code point
//! - `encode(bytes)` → key of the first code point only (typing filter)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

pub const TAG_OPEN: char = '[';
pub const TAG_CLOSE: char = ']';

/// Lowercase, unpadded hex name of a code point's glyph
///
/// Keys read back out of a scanned buffer are carried verbatim, so a key is not
/// guaranteed to be hex; see [`LookupKey::is_hex`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    /// Key for a single code point: `0x1F600` → `"1f600"`
    pub fn from_code_point(cp: u32) -> Self {
        LookupKey(format!("{:x}", cp))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// True for a non-empty run of lowercase hex digits
    pub fn is_hex(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    /// The code point this key names, if it is canonical hex
    pub fn code_point(&self) -> Option<u32> {
        if !self.is_hex() {
            return None;
        }
        u32::from_str_radix(&self.0, 16)
            .ok()
            .filter(|cp| *cp <= 0x10FFFF)
    }

    /// Wire form as embedded in text: `"[" + key + "]"`
    pub fn to_tag(&self) -> String {
        let mut tag = String::with_capacity(self.0.len() + 2);
        tag.push(TAG_OPEN);
        tag.push_str(&self.0);
        tag.push(TAG_CLOSE);
        tag
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LookupKey {
    fn from(s: &str) -> Self {
        LookupKey(s.to_string())
    }
}

impl From<String> for LookupKey {
    fn from(s: String) -> Self {
        LookupKey(s)
    }
}

impl AsRef<str> for LookupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strictly decode UTF-8 bytes into code points
pub fn decode_code_points(bytes: &[u8]) -> Result<Vec<u32>, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;
    Ok(text.chars().map(|c| c as u32).collect())
}

/// Hex key for every code point in `bytes`, in order
pub fn encode_all(bytes: &[u8]) -> Result<Vec<LookupKey>, DecodeError> {
    Ok(decode_code_points(bytes)?
        .into_iter()
        .map(LookupKey::from_code_point)
        .collect())
}

/// Hex key of the first code point in `bytes`
///
/// Returns `None` for empty or invalid input. Any code points after the first
/// are decoded but do not affect the result.
pub fn encode(bytes: &[u8]) -> Option<LookupKey> {
    match encode_all(bytes) {
        Ok(keys) => {
            if keys.len() > 1 {
                log::debug!(
                    "encode: {} code points, keying off '{}' only",
                    keys.len(),
                    keys[0]
                );
            }
            keys.into_iter().next()
        }
        Err(e) => {
            log::debug!("encode: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_emoji() {
        let key = encode("😀".as_bytes()).unwrap();
        assert_eq!(key.as_str(), "1f600");
    }

    #[test]
    fn test_encode_ascii_unpadded() {
        assert_eq!(encode(b"A").unwrap().as_str(), "41");
        assert_eq!(encode(b"\n").unwrap().as_str(), "a");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(b""), None);
    }

    #[test]
    fn test_encode_invalid_utf8() {
        assert_eq!(encode(&[0xFF, 0xFE]), None);
        // Truncated 4-byte sequence
        assert_eq!(encode(&[0xF0, 0x9F, 0x98]), None);
    }

    #[test]
    fn test_decode_error_position() {
        let err = decode_code_points(&[b'a', 0xC3]).unwrap_err();
        assert_eq!(err, DecodeError::InvalidUtf8 { valid_up_to: 1 });
    }

    #[test]
    fn test_encode_first_code_point_only() {
        let bytes = "😀😁".as_bytes();
        assert_eq!(encode(bytes).unwrap().as_str(), "1f600");

        let all = encode_all(bytes).unwrap();
        let all: Vec<&str> = all.iter().map(|k| k.as_str()).collect();
        assert_eq!(all, vec!["1f600", "1f601"]);
    }

    #[test]
    fn test_encode_all_combining_sequence() {
        // Keycap sequence: '1' + VS16 + COMBINING ENCLOSING KEYCAP
        let keys = encode_all("1\u{FE0F}\u{20E3}".as_bytes()).unwrap();
        let keys: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["31", "fe0f", "20e3"]);
    }

    #[test]
    fn test_key_to_tag() {
        assert_eq!(LookupKey::from_code_point(0x2600).to_tag(), "[2600]");
    }

    #[test]
    fn test_key_is_hex() {
        assert!(LookupKey::from("1f600").is_hex());
        assert!(!LookupKey::from("[1f600").is_hex());
        assert!(!LookupKey::from("1F600").is_hex());
        assert!(!LookupKey::from("").is_hex());
    }

    #[test]
    fn test_key_code_point() {
        assert_eq!(LookupKey::from("1f600").code_point(), Some(0x1F600));
        assert_eq!(LookupKey::from("110000").code_point(), None);
        assert_eq!(LookupKey::from("zz").code_point(), None);
    }
}

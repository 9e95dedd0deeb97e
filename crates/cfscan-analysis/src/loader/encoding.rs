//! Encoding-tolerant decoding of raw file bytes.
//!
//! Legacy template trees mix UTF-8, Latin-1 and Windows-1252 files, often
//! within one directory. Decoders are tried in a fixed order and the first
//! strict success wins; the sanitizing fallback at the end accepts anything.

use serde::{Deserialize, Serialize};

/// Encoding a file was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// UTF-8 with a byte-order mark (the mark is stripped).
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Utf8,
    /// ISO-8859-1.
    Latin1,
    Windows1252,
    /// Byte-level fallback with unprintable bytes replaced by spaces.
    Sanitized,
}

impl Encoding {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8Bom => "UTF-8 (BOM)",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
            Self::Windows1252 => "Windows-1252",
            Self::Sanitized => "sanitized",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded text plus the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedContent {
    pub text: String,
    pub encoding: Encoding,
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Windows-1252 code points for 0x80..=0x9F. `None` marks the five
/// bytes the code page leaves undefined.
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Decode raw bytes. Never fails.
///
/// Order: byte-order mark (UTF-8 / UTF-16LE / UTF-16BE), UTF-8,
/// ISO-8859-1, Windows-1252, then the sanitizing byte fallback.
pub fn decode(bytes: &[u8]) -> LoadedContent {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        if let Ok(text) = std::str::from_utf8(rest) {
            return content(text.to_string(), Encoding::Utf8Bom);
        }
    } else if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        if let Some(text) = decode_utf16(rest, u16::from_le_bytes) {
            return content(text, Encoding::Utf16Le);
        }
    } else if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        if let Some(text) = decode_utf16(rest, u16::from_be_bytes) {
            return content(text, Encoding::Utf16Be);
        }
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return content(text.to_string(), Encoding::Utf8);
    }
    tracing::debug!("content is not valid UTF-8, trying ISO-8859-1");

    if let Some(text) = decode_latin1(bytes) {
        return content(text, Encoding::Latin1);
    }
    tracing::debug!("content has C1 control bytes, trying Windows-1252");

    if let Some(text) = decode_windows_1252(bytes) {
        return content(text, Encoding::Windows1252);
    }
    tracing::debug!("content has bytes undefined in Windows-1252, sanitizing");

    content(sanitize(bytes), Encoding::Sanitized)
}

fn content(text: String, encoding: Encoding) -> LoadedContent {
    LoadedContent { text, encoding }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

/// Strict ISO-8859-1: rejects the C1 control range, which does not occur in
/// genuine Latin-1 text and almost always means Windows-1252.
fn decode_latin1(bytes: &[u8]) -> Option<String> {
    if bytes.iter().any(|b| (0x80..=0x9F).contains(b)) {
        return None;
    }
    Some(bytes.iter().map(|&b| b as char).collect())
}

fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    let mut text = String::with_capacity(bytes.len());
    for &b in bytes {
        let ch = match b {
            0x80..=0x9F => WINDOWS_1252_HIGH[(b - 0x80) as usize]?,
            _ => b as char,
        };
        text.push(ch);
    }
    Some(text)
}

/// Keep printable ASCII, `\n`, `\r`, `\t` and Latin-1 0xA0..=0xFF; every
/// other byte becomes a space.
pub fn sanitize(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x20..=0x7E | 0xA0..=0xFF | b'\n' | b'\r' | b'\t' => b as char,
            _ => ' ',
        })
        .collect()
}

/// Number of `\n`-delimited segments, ignoring trailing empty segments.
/// An empty file has 0 lines.
pub fn line_count(text: &str) -> usize {
    let trimmed = text.trim_end_matches('\n');
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.split('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        let decoded = decode("<cfset x = \"café\">".as_bytes());
        assert_eq!(decoded.encoding, Encoding::Utf8);
        assert_eq!(decoded.text, "<cfset x = \"café\">");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"<cfoutput>");
        let decoded = decode(&bytes);
        assert_eq!(decoded.encoding, Encoding::Utf8Bom);
        assert_eq!(decoded.text, "<cfoutput>");
    }

    #[test]
    fn test_utf16_le_with_bom() {
        let mut bytes = UTF16_LE_BOM.to_vec();
        for unit in "a\nb".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode(&bytes);
        assert_eq!(decoded.encoding, Encoding::Utf16Le);
        assert_eq!(decoded.text, "a\nb");
    }

    #[test]
    fn test_utf16_be_with_bom() {
        let mut bytes = UTF16_BE_BOM.to_vec();
        for unit in "ñ".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        let decoded = decode(&bytes);
        assert_eq!(decoded.encoding, Encoding::Utf16Be);
        assert_eq!(decoded.text, "ñ");
    }

    #[test]
    fn test_odd_length_utf16_falls_through() {
        // 0xFF 0xFE then one stray byte: not UTF-16, not UTF-8, but Latin-1.
        let decoded = decode(&[0xFF, 0xFE, 0x41]);
        assert_eq!(decoded.encoding, Encoding::Latin1);
        assert_eq!(decoded.text, "ÿþA");
    }

    #[test]
    fn test_latin1() {
        // "año" in ISO-8859-1
        let decoded = decode(&[0x61, 0xF1, 0x6F]);
        assert_eq!(decoded.encoding, Encoding::Latin1);
        assert_eq!(decoded.text, "año");
    }

    #[test]
    fn test_windows_1252_smart_quotes() {
        let decoded = decode(&[0x93, b'h', b'i', 0x94, b' ', 0x80]);
        assert_eq!(decoded.encoding, Encoding::Windows1252);
        assert_eq!(decoded.text, "\u{201C}hi\u{201D} \u{20AC}");
    }

    #[test]
    fn test_sanitized_fallback() {
        // 0x81 is undefined in Windows-1252 and invalid as UTF-8 lead byte.
        let decoded = decode(&[b'a', 0x81, b'\n', 0x00, 0xE9, b'\t']);
        assert_eq!(decoded.encoding, Encoding::Sanitized);
        assert_eq!(decoded.text, "a \n é\t");
    }

    #[test]
    fn test_every_byte_decodes() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let decoded = decode(&bytes);
        assert!(!decoded.text.is_empty());
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 0);
        assert_eq!(line_count("\n\n"), 0);
        assert_eq!(line_count("one"), 1);
        assert_eq!(line_count("one\ntwo"), 2);
        assert_eq!(line_count("one\ntwo\n"), 2);
        assert_eq!(line_count("one\n\nthree\n\n"), 3);
        assert_eq!(line_count("a\r\nb\r\n"), 2);
    }
}

//! Detect-and-convert normalization of caller supplied bytes to UTF-8.
//!
//! Option strings and script expressions may come from legacy sources
//! (database dumps, templated files). Every text leaf is normalized when it
//! enters the tree so the encode step only ever sees valid UTF-8.
//!
//! Detection order:
//! - valid UTF-8 (ASCII included) is kept as-is
//! - a UTF-16 byte order mark selects UTF-16 LE/BE
//! - anything else is decoded as Windows-1252 (a superset of Latin-1)

use std::borrow::Cow;

use tracing::trace;

/// Source encoding picked by [`detect_encoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Windows1252,
}

const WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if std::str::from_utf8(bytes).is_ok() {
        return TextEncoding::Utf8;
    }
    match bytes {
        [0xFF, 0xFE, rest @ ..] if rest.len() % 2 == 0 => TextEncoding::Utf16Le,
        [0xFE, 0xFF, rest @ ..] if rest.len() % 2 == 0 => TextEncoding::Utf16Be,
        _ => TextEncoding::Windows1252,
    }
}

/// Converts `bytes` to UTF-8 text, borrowing when no conversion is needed.
#[must_use]
pub fn normalize_utf8(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }
    let encoding = detect_encoding(bytes);
    trace!(?encoding, len = bytes.len(), "converting text to utf-8");
    let decoded = match encoding {
        TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
            decode_utf16(&bytes[2..], encoding == TextEncoding::Utf16Be)
        }
        TextEncoding::Utf8 | TextEncoding::Windows1252 => None,
    };
    Cow::Owned(decoded.unwrap_or_else(|| decode_windows_1252(bytes)))
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> Option<String> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}

fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| match byte {
            0x80..=0x9F => WINDOWS_1252_HIGH[usize::from(byte - 0x80)],
            _ => char::from(byte),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{TextEncoding, detect_encoding, normalize_utf8};

    #[test]
    fn utf8_input_is_borrowed_unchanged() {
        let text = normalize_utf8("Gonçalo € 漢字".as_bytes());
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "Gonçalo € 漢字");
    }

    #[test]
    fn latin1_bytes_are_converted() {
        // "Gonçalo" in ISO-8859-1
        let bytes = [0x47, 0x6F, 0x6E, 0xE7, 0x61, 0x6C, 0x6F];
        assert_eq!(detect_encoding(&bytes), TextEncoding::Windows1252);
        assert_eq!(normalize_utf8(&bytes), "Gonçalo");
    }

    #[test]
    fn windows_1252_punctuation_is_mapped() {
        let bytes = [0x80, 0x20, 0x93, 0x71, 0x94];
        assert_eq!(normalize_utf8(&bytes), "€ \u{201C}q\u{201D}");
    }

    #[test]
    fn utf16_with_bom_is_decoded() {
        let le = [0xFF, 0xFE, 0x41, 0x00, 0xE9, 0x00];
        assert_eq!(detect_encoding(&le), TextEncoding::Utf16Le);
        assert_eq!(normalize_utf8(&le), "Aé");

        let be = [0xFE, 0xFF, 0x00, 0x41, 0x00, 0xE9];
        assert_eq!(detect_encoding(&be), TextEncoding::Utf16Be);
        assert_eq!(normalize_utf8(&be), "Aé");
    }

    #[test]
    fn unpaired_utf16_surrogate_falls_back_to_single_byte_decoding() {
        let bytes = [0xFF, 0xFE, 0x00, 0xD8];
        let text = normalize_utf8(&bytes);
        assert_eq!(text.chars().count(), 4);
    }
}

use std::fmt;

use encoding_rs::{BIG5, DecoderResult, EUC_JP, EUC_KR, Encoding, ISO_2022_JP, SHIFT_JIS};

use crate::error::DecodeError;

/// Input encoding used to turn pending bytes into characters.
///
/// Two charsets are handled locally because the WHATWG label table maps
/// their common names elsewhere: `latin-1` resolves to windows-1252 there,
/// and `ascii` likewise. Everything else goes through [`encoding_rs`].
///
/// ```text
/// ┌──────────────┬───────────────────────────────────┬──────────────┐
/// │ Variant      │ Labels (case-insensitive, _ ≡ -)  │ Max unit len │
/// ├──────────────┼───────────────────────────────────┼──────────────┤
/// │ Latin1       │ latin-1, latin1, iso-8859-1, l1   │ 1            │
/// │ Ascii        │ ascii, us-ascii, 646              │ 1            │
/// │ Whatwg(enc)  │ utf-8, utf-16le, shift_jis, ...   │ 1 to 4       │
/// └──────────────┴───────────────────────────────────┴──────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    /// ISO-8859-1: byte `n` is code point `U+00nn`.
    Latin1,
    /// 7-bit ASCII: bytes above `0x7F` never decode.
    Ascii,
    Whatwg(&'static Encoding),
}

impl Charset {
    pub const UTF_8: Self = Self::Whatwg(encoding_rs::UTF_8);

    /// Resolve an encoding label.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownEncoding`] when no charset matches.
    /// Labels that WHATWG maps to the "replacement" encoding are rejected
    /// too, since that encoding decodes nothing.
    ///
    /// Returns [`DecodeError::StatefulEncoding`] for ISO-2022-JP. Its escape
    /// sequences switch a mode that later characters depend on, so it cannot
    /// be decoded one unit at a time.
    pub fn for_label(label: &str) -> Result<Self, DecodeError> {
        let trimmed = label.trim();
        let normalized = trimmed.to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" | "u8" => Ok(Self::UTF_8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" | "cp819" | "8859" => {
                Ok(Self::Latin1)
            }
            "ascii" | "us-ascii" | "646" => Ok(Self::Ascii),
            _ => {
                let encoding = Encoding::for_label_no_replacement(trimmed.as_bytes())
                    .or_else(|| Encoding::for_label_no_replacement(normalized.as_bytes()))
                    .ok_or_else(|| DecodeError::UnknownEncoding(label.to_string()))?;
                if encoding == ISO_2022_JP {
                    return Err(DecodeError::StatefulEncoding(encoding.name()));
                }
                Ok(Self::Whatwg(encoding))
            }
        }
    }

    /// Canonical name of the charset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Ascii => "US-ASCII",
            Self::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Longest byte sequence that can encode a single character.
    ///
    /// The decode engine gives up on a pending buffer once it reaches this
    /// length without producing a character.
    #[must_use]
    pub fn max_unit_len(self) -> usize {
        match self {
            Self::Latin1 | Self::Ascii => 1,
            Self::Whatwg(encoding) if encoding.is_single_byte() => 1,
            Self::Whatwg(encoding)
                if encoding == SHIFT_JIS || encoding == BIG5 || encoding == EUC_KR =>
            {
                2
            }
            Self::Whatwg(encoding) if encoding == EUC_JP => 3,
            // UTF-8, UTF-16 surrogate pairs, GB18030 four-byte sequences
            Self::Whatwg(_) => 4,
        }
    }

    /// Try to decode `bytes` as a complete run of characters.
    ///
    /// Every call starts from a fresh decoder state with no BOM sniffing.
    /// Returns `None` if the bytes are malformed, end in the middle of a
    /// sequence, or decode to nothing at all.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let text: String = match self {
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Ascii if bytes.is_ascii() => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Ascii => return None,
            Self::Whatwg(encoding) => {
                let mut decoder = encoding.new_decoder_without_bom_handling();
                let capacity = decoder.max_utf8_buffer_length_without_replacement(bytes.len())?;
                let mut text = String::with_capacity(capacity);
                let (result, _read) =
                    decoder.decode_to_string_without_replacement(bytes, &mut text, true);
                match result {
                    DecoderResult::InputEmpty => text,
                    DecoderResult::Malformed(..) | DecoderResult::OutputFull => return None,
                }
            }
        };
        (!text.is_empty()).then_some(text)
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::UTF_8
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_style_labels() {
        assert_eq!(Charset::for_label("utf-8").unwrap(), Charset::UTF_8);
        assert_eq!(Charset::for_label("UTF_8").unwrap(), Charset::UTF_8);
        assert_eq!(Charset::for_label("latin-1").unwrap(), Charset::Latin1);
        assert_eq!(Charset::for_label("ISO_8859_1").unwrap(), Charset::Latin1);
        assert_eq!(Charset::for_label("ascii").unwrap(), Charset::Ascii);
    }

    #[test]
    fn whatwg_labels() {
        assert_eq!(
            Charset::for_label("shift_jis").unwrap(),
            Charset::Whatwg(SHIFT_JIS)
        );
        assert_eq!(
            Charset::for_label("cp1252").unwrap().name(),
            "windows-1252"
        );
        assert_eq!(Charset::for_label("utf-16le").unwrap().name(), "UTF-16LE");
    }

    #[test]
    fn unknown_label_rejected() {
        let err = Charset::for_label("klingon").unwrap_err();
        assert!(matches!(err, DecodeError::UnknownEncoding(name) if name == "klingon"));
    }

    #[test]
    fn iso_2022_jp_rejected_as_stateful() {
        for label in ["iso-2022-jp", "csISO2022JP", "ISO_2022_JP"] {
            let err = Charset::for_label(label).unwrap_err();
            assert!(
                matches!(err, DecodeError::StatefulEncoding("ISO-2022-JP")),
                "{label}: {err}"
            );
        }
    }

    #[test]
    fn replacement_labels_rejected() {
        assert!(Charset::for_label("iso-2022-kr").is_err());
    }

    #[test]
    fn unit_lengths() {
        assert_eq!(Charset::UTF_8.max_unit_len(), 4);
        assert_eq!(Charset::Latin1.max_unit_len(), 1);
        assert_eq!(Charset::for_label("koi8-r").unwrap().max_unit_len(), 1);
        assert_eq!(Charset::for_label("euc-jp").unwrap().max_unit_len(), 3);
        assert_eq!(Charset::for_label("gb18030").unwrap().max_unit_len(), 4);
    }

    #[test]
    fn utf8_incomplete_and_malformed() {
        assert_eq!(Charset::UTF_8.decode(b"A").as_deref(), Some("A"));
        assert_eq!(Charset::UTF_8.decode(&[0xF0, 0x9F]), None);
        assert_eq!(
            Charset::UTF_8.decode(&[0xF0, 0x9F, 0x99, 0xB8]).as_deref(),
            Some("\u{1F678}")
        );
        assert_eq!(Charset::UTF_8.decode(&[0xD7]), None);
        assert_eq!(Charset::UTF_8.decode(&[0xFF]), None);
    }

    #[test]
    fn utf8_bom_is_kept() {
        assert_eq!(
            Charset::UTF_8.decode(&[0xEF, 0xBB, 0xBF]).as_deref(),
            Some("\u{FEFF}")
        );
    }

    #[test]
    fn latin1_maps_every_byte() {
        assert_eq!(Charset::Latin1.decode(&[0xD7]).as_deref(), Some("\u{D7}"));
        assert_eq!(Charset::Latin1.decode(&[0x80]).as_deref(), Some("\u{80}"));
    }

    #[test]
    fn ascii_rejects_high_bytes() {
        assert_eq!(Charset::Ascii.decode(b"z").as_deref(), Some("z"));
        assert_eq!(Charset::Ascii.decode(&[0xC3]), None);
    }

    #[test]
    fn utf16_needs_both_bytes() {
        let utf16 = Charset::for_label("utf-16le").unwrap();
        assert_eq!(utf16.decode(&[0x41]), None);
        assert_eq!(utf16.decode(&[0x41, 0x00]).as_deref(), Some("A"));
        assert_eq!(
            utf16.decode(&[0x3D, 0xD8, 0x78, 0xDE]).as_deref(),
            Some("\u{1F678}")
        );
    }

    #[test]
    fn empty_input_is_not_a_character() {
        assert_eq!(Charset::UTF_8.decode(&[]), None);
        assert_eq!(Charset::Latin1.decode(&[]), None);
    }
}

use crate::sanitize::sanitize;

/// Display glyph for a byte that could not be decoded.
pub const INVALID_GLYPH: char = 'X';

/// One resolved piece of input.
///
/// ```text
/// ┌──────────────┬──────────────┬─────────┬─────────────────────────┐
/// │ Variant      │ hex_token()  │ display │ Covers                  │
/// ├──────────────┼──────────────┼─────────┼─────────────────────────┤
/// │ CodePoint    │ "0041"       │ 'A'     │ all bytes of the char   │
/// │              │ "1F678"      │ '🙸'    │                         │
/// │              │ "0001"       │ '.'     │                         │
/// │ InvalidByte  │ "?D7?"       │ 'X'     │ exactly one raw byte    │
/// └──────────────┴──────────────┴─────────┴─────────────────────────┘
/// ```
///
/// `offset` is the zero-based position of the unit's first byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodedUnit {
    CodePoint { offset: u64, ch: char },
    InvalidByte { offset: u64, byte: u8 },
}

impl DecodedUnit {
    #[must_use]
    pub fn offset(&self) -> u64 {
        match *self {
            Self::CodePoint { offset, .. } | Self::InvalidByte { offset, .. } => offset,
        }
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::InvalidByte { .. })
    }

    /// Uppercase hex scalar value padded to four digits, or `?XX?` for an
    /// invalid byte.
    #[must_use]
    pub fn hex_token(&self) -> String {
        match *self {
            Self::CodePoint { ch, .. } => format!("{:04X}", u32::from(ch)),
            Self::InvalidByte { byte, .. } => format!("?{byte:02X}?"),
        }
    }

    /// Character shown in the text column.
    #[must_use]
    pub fn display(&self) -> char {
        match *self {
            Self::CodePoint { ch, .. } => sanitize(ch),
            Self::InvalidByte { .. } => INVALID_GLYPH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_point_tokens() {
        let unit = DecodedUnit::CodePoint { offset: 3, ch: 'A' };
        assert_eq!(unit.hex_token(), "0041");
        assert_eq!(unit.display(), 'A');
        assert_eq!(unit.offset(), 3);

        let wide = DecodedUnit::CodePoint { offset: 0, ch: '\u{10FFFD}' };
        assert_eq!(wide.hex_token(), "10FFFD");
    }

    #[test]
    fn control_code_point_displays_dot() {
        let unit = DecodedUnit::CodePoint { offset: 0, ch: '\x01' };
        assert_eq!(unit.hex_token(), "0001");
        assert_eq!(unit.display(), '.');
    }

    #[test]
    fn invalid_byte_tokens() {
        let unit = DecodedUnit::InvalidByte { offset: 9, byte: 0x0A };
        assert_eq!(unit.hex_token(), "?0A?");
        assert_eq!(unit.display(), 'X');
        assert!(unit.is_invalid());
    }
}

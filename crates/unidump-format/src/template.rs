use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Source text of the default line template.
pub const DEFAULT_TEMPLATE: &str = "{byte:>7}    {repr}    {data}\n";

/// The three substitution slots a line template may reference.
///
/// ```text
/// ┌───────┬──────────────────────────────────────────────┬─────────────┐
/// │ Name  │ Value                                        │ Default     │
/// ├───────┼──────────────────────────────────────────────┼─────────────┤
/// │ byte  │ start offset of the row in the input         │ right-align │
/// │ repr  │ space-joined hex tokens, padded to row width │ left-align  │
/// │ data  │ sanitized rendering of the row's characters  │ left-align  │
/// └───────┴──────────────────────────────────────────────┴─────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Byte,
    Repr,
    Data,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(Self::Byte),
            "repr" => Some(Self::Repr),
            "data" => Some(Self::Data),
            _ => None,
        }
    }

    fn default_align(self) -> Align {
        match self {
            Self::Byte => Align::Right,
            Self::Repr | Self::Data => Align::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Center),
            _ => None,
        }
    }
}

/// Number base used to print the `byte` slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Radix {
    #[default]
    Decimal,
    LowerHex,
    UpperHex,
    Octal,
    Binary,
}

/// Parsed `[[fill]align][0][width][type]` part of a replacement field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub fill: char,
    pub align: Align,
    pub width: usize,
    pub radix: Radix,
}

impl FieldSpec {
    fn plain(field: Field) -> Self {
        Self {
            fill: ' ',
            align: field.default_align(),
            width: 0,
            radix: Radix::Decimal,
        }
    }

    fn parse(field: Field, spec: &str, position: usize) -> Result<Self, FormatError> {
        let chars: Vec<char> = spec.chars().collect();
        let mut out = Self::plain(field);
        let mut explicit_align = false;
        let mut i = 0;

        if let Some(align) = chars.get(1).copied().and_then(Align::from_char) {
            out.fill = chars[0];
            out.align = align;
            explicit_align = true;
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(Align::from_char) {
            out.align = align;
            explicit_align = true;
            i = 1;
        }

        // `0` before the width means zero fill unless an alignment was given.
        if chars.get(i) == Some(&'0') {
            if !explicit_align {
                out.fill = '0';
            }
            i += 1;
        }

        let digits_start = i;
        while chars.get(i).is_some_and(char::is_ascii_digit) {
            i += 1;
        }
        if i > digits_start {
            let digits: String = chars[digits_start..i].iter().collect();
            out.width = digits
                .parse()
                .map_err(|_| FormatError::template(position, "field width is too large"))?;
        }

        if let Some(&ty) = chars.get(i) {
            out.radix = match (field, ty) {
                (Field::Byte, 'd') => Radix::Decimal,
                (Field::Byte, 'x') => Radix::LowerHex,
                (Field::Byte, 'X') => Radix::UpperHex,
                (Field::Byte, 'o') => Radix::Octal,
                (Field::Byte, 'b') => Radix::Binary,
                (Field::Repr | Field::Data, 's') => Radix::Decimal,
                _ => {
                    return Err(FormatError::template(
                        position,
                        format!("unknown format code {ty:?} for field {field:?}"),
                    ));
                }
            };
            i += 1;
        }

        if i != chars.len() {
            return Err(FormatError::template(
                position,
                format!("invalid format spec {spec:?}"),
            ));
        }
        Ok(out)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot { field: Field, spec: FieldSpec },
}

/// A parsed output line layout.
///
/// Templates use `{name}` or `{name:spec}` replacement fields with the slot
/// names `byte`, `repr`, and `data`; literal braces are written `{{` and
/// `}}`. The spec grammar is `[[fill]align][0][width][type]`:
///
/// ```text
/// "{byte:>7}    {repr}    {data}\n"   default layout
/// "{byte:08X}  {data}\n"              hex offsets, text column only
/// "{repr}\n"                          one row of tokens per line
/// ```
///
/// Widths and padding count characters, not bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl LineTemplate {
    /// Parse a template string.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Template`] for unbalanced braces, unknown slot
    /// names, and malformed format specs.
    pub fn parse(source: &str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' => {
                    if chars.next_if(|&(_, next)| next == '{').is_some() {
                        literal.push('{');
                        continue;
                    }
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((p, '{')) => {
                                return Err(FormatError::template(
                                    p,
                                    "nested '{' in replacement field",
                                ));
                            }
                            Some((_, inner)) => body.push(inner),
                            None => {
                                return Err(FormatError::template(
                                    pos,
                                    "unclosed replacement field",
                                ));
                            }
                        }
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_slot(&body, pos)?);
                }
                '}' => {
                    if chars.next_if(|&(_, next)| next == '}').is_some() {
                        literal.push('}');
                    } else {
                        return Err(FormatError::template(pos, "single '}' in template"));
                    }
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text this layout was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute the three slot values and return the finished line.
    #[must_use]
    pub fn render(&self, byte: u64, repr: &str, data: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + repr.len() + data.len() + 8);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot { field, spec } => {
                    let value = match field {
                        Field::Byte => format_offset(byte, spec.radix),
                        Field::Repr => repr.to_string(),
                        Field::Data => data.to_string(),
                    };
                    pad_into(&mut out, &value, spec);
                }
            }
        }
        out
    }
}

impl Default for LineTemplate {
    fn default() -> Self {
        let byte = FieldSpec {
            width: 7,
            ..FieldSpec::plain(Field::Byte)
        };
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: vec![
                Segment::Slot {
                    field: Field::Byte,
                    spec: byte,
                },
                Segment::Literal("    ".to_string()),
                Segment::Slot {
                    field: Field::Repr,
                    spec: FieldSpec::plain(Field::Repr),
                },
                Segment::Literal("    ".to_string()),
                Segment::Slot {
                    field: Field::Data,
                    spec: FieldSpec::plain(Field::Data),
                },
                Segment::Literal("\n".to_string()),
            ],
        }
    }
}

impl FromStr for LineTemplate {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LineTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_slot(body: &str, position: usize) -> Result<Segment, FormatError> {
    let (name, spec) = match body.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (body, None),
    };
    if name.is_empty() {
        return Err(FormatError::template(
            position,
            "positional replacement fields are not supported",
        ));
    }
    let field = Field::from_name(name).ok_or_else(|| {
        FormatError::template(
            position,
            format!("unknown field {name:?}, expected byte, repr or data"),
        )
    })?;
    let spec = match spec {
        Some(spec) => FieldSpec::parse(field, spec, position)?,
        None => FieldSpec::plain(field),
    };
    Ok(Segment::Slot { field, spec })
}

fn format_offset(value: u64, radix: Radix) -> String {
    match radix {
        Radix::Decimal => value.to_string(),
        Radix::LowerHex => format!("{value:x}"),
        Radix::UpperHex => format!("{value:X}"),
        Radix::Octal => format!("{value:o}"),
        Radix::Binary => format!("{value:b}"),
    }
}

fn pad_into(out: &mut String, value: &str, spec: &FieldSpec) {
    let len = value.chars().count();
    let gap = spec.width.saturating_sub(len);
    let (before, after) = match spec.align {
        Align::Left => (0, gap),
        Align::Right => (gap, 0),
        Align::Center => (gap / 2, gap - gap / 2),
    };
    out.extend(std::iter::repeat_n(spec.fill, before));
    out.push_str(value);
    out.extend(std::iter::repeat_n(spec.fill, after));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_parsed_default() {
        let parsed = LineTemplate::parse(DEFAULT_TEMPLATE).unwrap();
        assert_eq!(parsed, LineTemplate::default());
    }

    #[test]
    fn default_layout() {
        let line = LineTemplate::default().render(12, "0041", "A");
        assert_eq!(line, "     12    0041    A\n");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let t = LineTemplate::parse("{{{byte}}}").unwrap();
        assert_eq!(t.render(3, "", ""), "{3}");
    }

    #[test]
    fn zero_padded_hex_offset() {
        let t = LineTemplate::parse("{byte:08X}|{data}").unwrap();
        assert_eq!(t.render(255, "00FF", "ÿ"), "000000FF|ÿ");
    }

    #[test]
    fn fill_and_center_align() {
        let t = LineTemplate::parse("[{data:*^7}]").unwrap();
        assert_eq!(t.render(0, "", "abc"), "[**abc**]");

        let t = LineTemplate::parse("[{data:-^6}]").unwrap();
        assert_eq!(t.render(0, "", "abc"), "[-abc--]");
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let t = LineTemplate::parse("{data:<4}|").unwrap();
        assert_eq!(t.render(0, "", "é🙸"), "é🙸  |");
    }

    #[test]
    fn value_longer_than_width_is_not_truncated() {
        let t = LineTemplate::parse("{byte:>2}").unwrap();
        assert_eq!(t.render(12345, "", ""), "12345");
    }

    #[test]
    fn zero_flag_on_string_pads_right() {
        let t = LineTemplate::parse("{data:05}").unwrap();
        assert_eq!(t.render(0, "", "ab"), "ab000");
    }

    #[test]
    fn explicit_align_keeps_space_fill_with_zero_flag() {
        let t = LineTemplate::parse("{byte:>05}").unwrap();
        assert_eq!(t.render(7, "", ""), "    7");
    }

    #[test]
    fn unknown_field_rejected() {
        let err = LineTemplate::parse("{offset}").unwrap_err();
        assert!(matches!(err, FormatError::Template { position: 0, .. }));
    }

    #[test]
    fn positional_field_rejected() {
        assert!(LineTemplate::parse("a {} b").is_err());
    }

    #[test]
    fn unclosed_field_rejected() {
        let err = LineTemplate::parse("ab{byte").unwrap_err();
        assert!(matches!(err, FormatError::Template { position: 2, .. }));
    }

    #[test]
    fn stray_closing_brace_rejected() {
        let err = LineTemplate::parse("x}y").unwrap_err();
        assert!(matches!(err, FormatError::Template { position: 1, .. }));
    }

    #[test]
    fn hex_type_on_text_field_rejected() {
        assert!(LineTemplate::parse("{repr:x}").is_err());
    }

    #[test]
    fn trailing_garbage_in_spec_rejected() {
        assert!(LineTemplate::parse("{byte:7z}").is_err());
    }

    #[test]
    fn display_round_trips_source() {
        let t: LineTemplate = "{repr}\n".parse().unwrap();
        assert_eq!(t.to_string(), "{repr}\n");
    }
}

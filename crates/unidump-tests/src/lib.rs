//! Shared fixtures and helpers for the unidump integration suite.
//!
//! The test files under `tests/` and the benches under `benches/` build
//! their inputs from here so every suite dumps the same byte sequences.

use unidump_decoder::{DumpConfig, DumpSummary, unidump};

/// Template that is easy to split back into fields: `byte|repr|data`.
///
/// Neither the offset nor the hex tokens can contain `|`, and the text
/// column never contains a newline because line breaks are sanitized.
pub const PIPE_TEMPLATE: &str = "{byte}|{repr}|{data}\n";

/// Named inputs used across the suites.
pub mod fixtures {
    /// Control byte, a four-byte emoji, then ASCII.
    pub const MIXED: &[u8] = b"\x01\xF0\x9F\x99\xB8ABC";

    /// A lone byte that is not valid UTF-8 but is `×` in Latin-1.
    pub const LONE_D7: &[u8] = b"\xD7";

    pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOP";

    /// Man elf, medium skin tone: elf, skin modifier, ZWJ, male sign, VS16.
    pub const ELF_ZWJ: &[u8] =
        b"\xF0\x9F\xA7\x9D\xF0\x9F\x8F\xBD\xE2\x80\x8D\xE2\x99\x82\xEF\xB8\x8F";

    /// Valid text interrupted by a stray continuation byte and a truncated
    /// three-byte sequence at the end.
    pub const BROKEN_TAIL: &[u8] = b"caf\xC3\xA9 \x80ok\xE2\x82";
}

/// One output row split back into its fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRow {
    pub offset: u64,
    pub tokens: Vec<String>,
    pub text: String,
}

/// Dump `input` with the default template and return the output text.
///
/// # Panics
///
/// Panics if the options are invalid or the output is not UTF-8.
#[must_use]
pub fn dump_to_string(input: &[u8], row_width: usize, encoding: &str) -> String {
    dump_with(input, row_width, encoding, None).0
}

/// Dump `input` with an optional custom template, returning the output and
/// the run summary.
///
/// # Panics
///
/// Panics if the options are invalid or the output is not UTF-8.
#[must_use]
pub fn dump_with(
    input: &[u8],
    row_width: usize,
    encoding: &str,
    template: Option<&str>,
) -> (String, DumpSummary) {
    let config = DumpConfig::from_options(row_width, encoding, template)
        .unwrap_or_else(|e| panic!("bad dump options: {e}"));
    let mut out = Vec::new();
    let summary = unidump(input, &config, &mut out)
        .unwrap_or_else(|e| panic!("in-memory dump failed: {e}"));
    let text = String::from_utf8(out).expect("dump output is always UTF-8");
    (text, summary)
}

/// Dump with [`PIPE_TEMPLATE`] and split every line back into a row.
///
/// # Panics
///
/// Panics if a line does not have the `byte|repr|data` shape.
#[must_use]
pub fn dump_rows(input: &[u8], row_width: usize, encoding: &str) -> Vec<ParsedRow> {
    let (text, _) = dump_with(input, row_width, encoding, Some(PIPE_TEMPLATE));
    text.lines().map(parse_pipe_row).collect()
}

fn parse_pipe_row(line: &str) -> ParsedRow {
    let mut parts = line.splitn(3, '|');
    let (Some(offset), Some(repr), Some(text)) = (parts.next(), parts.next(), parts.next()) else {
        panic!("malformed row {line:?}");
    };
    ParsedRow {
        offset: offset.parse().expect("offset column is decimal"),
        tokens: repr.split_whitespace().map(str::to_string).collect(),
        text: text.to_string(),
    }
}

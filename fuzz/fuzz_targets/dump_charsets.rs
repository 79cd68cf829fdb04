#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unidump_decoder::{unidump, DumpConfig};

const LABELS: &[&str] = &[
    "utf-8",
    "latin-1",
    "ascii",
    "windows-1252",
    "koi8-r",
    "shift_jis",
    "euc-jp",
    "euc-kr",
    "big5",
    "gb18030",
    "utf-16le",
    "utf-16be",
];

#[derive(Debug, Arbitrary)]
struct DumpInput<'a> {
    charset: u8,
    row_width: u8,
    bytes: &'a [u8],
}

// Fuzz target: dump under every supported charset family.
//
// Multi-byte and surrogate-pair decoders must still account for every
// input byte at any row width.
fuzz_target!(|input: DumpInput<'_>| {
    let label = LABELS[usize::from(input.charset) % LABELS.len()];
    let width = usize::from(input.row_width % 32) + 1;

    let config = DumpConfig::from_options(width, label, None).unwrap();
    let mut out = Vec::new();
    let summary = unidump(input.bytes, &config, &mut out).unwrap();

    assert_eq!(summary.bytes_read, input.bytes.len() as u64);
    assert!(summary.rows <= summary.units);
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use unidump_decoder::{unidump, DumpConfig};

// Fuzz target: full UTF-8 dump of arbitrary bytes.
//
// Every input byte must be consumed and the output must stay UTF-8 no
// matter how malformed the input is. Catches bugs in:
// - Pending buffer recovery after invalid or truncated sequences
// - Offset bookkeeping across rows
// - Row flushing at end of input
fuzz_target!(|data: &[u8]| {
    let config = DumpConfig::default();
    let mut out = Vec::new();
    let summary = unidump(data, &config, &mut out).unwrap();

    assert_eq!(summary.bytes_read, data.len() as u64);
    assert!(summary.invalid_bytes <= summary.bytes_read);
    assert!(std::str::from_utf8(&out).is_ok());
});

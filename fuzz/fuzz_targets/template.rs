#![no_main]

use libfuzzer_sys::fuzz_target;
use unidump_format::LineTemplate;

// Fuzz target: line template parsing and rendering.
//
// Parsing arbitrary text must either fail cleanly or produce a template
// that renders without panicking and keeps its source text.
fuzz_target!(|source: &str| {
    let Ok(template) = LineTemplate::parse(source) else {
        return;
    };
    assert_eq!(template.source(), source);

    // Widths of five digits or more are legal but only exercise the allocator.
    let longest_digit_run = source
        .split(|c: char| !c.is_ascii_digit())
        .map(str::len)
        .max()
        .unwrap_or(0);
    if longest_digit_run > 4 {
        return;
    }

    let _ = template.render(u64::MAX, "0041 ?FF?", "AX");
    let _ = template.render(0, "", "");
});

/// unidump: hexdump(1) for Unicode data.
///
/// Prints three columns per row: the byte offset of the row's first code
/// point, the code points in hex, and the decoded text with control and
/// whitespace characters replaced by a dot. Bytes that do not decode show
/// up as `?XX?` with an `X` in the text column.
///
/// ```text
/// unidump [OPTIONS] [FILE]...
///
/// Options:
///   -n, --length <LENGTH>   Code points per row (default 16)
///   -c, --encoding <ENC>    Input encoding (default utf-8)
///   -e, --format <FORMAT>   Line template with {byte}, {repr}, {data}
///   -v, --verbose           Debug logging on stderr
///   -h, --help              Print help
///   -V, --version           Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                             |
/// |------|-----------------------------------------------------|
/// | 0    | Every input was dumped                              |
/// | 1    | An input could not be opened, or a fatal I/O error  |
///
/// Dump output goes to stdout; diagnostics go to stderr.
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use unidump_decoder::Charset;
use unidump_format::{DEFAULT_ROW_WIDTH, LineTemplate};

mod cmd_dump;
mod logging;

const EXAMPLES: &str = "\
Examples:
  Basic usage with stdin:
      echo -n 'ABCDEFGHIJKLMNOP' | unidump -n 4
            0    0041 0042 0043 0044    ABCD
            4    0045 0046 0047 0048    EFGH
            8    0049 004A 004B 004C    IJKL
           12    004D 004E 004F 0050    MNOP

  Dump the code points of a file in another encoding:
      unidump -c latin-1 some-legacy-file

  Dump many files at once, mixing in stdin with '-':
      cat notes.txt | unidump foo-*.txt - bar.txt

  Control characters and whitespace are rendered as dots:
      echo -n -e '\\x01' | unidump -n 1
            0    0001    .

  Use it like strings(1):
      unidump -e '{data}' some-file.bin

  Only print the code points, one per line:
      unidump -e '{repr}'$'\\n' -n 1 some-file.txt
";

/// A Unicode code point dump.
#[derive(Parser)]
#[command(
    name = "unidump",
    version,
    about = "hexdump(1) for Unicode data",
    long_about = "A Unicode code point dump.\n\n\
        Analyses the input and prints three columns: the raw byte index of the \
        first code point in the row, the code points in hex notation, and the \
        raw input characters with control and whitespace characters replaced \
        by a dot.\n\n\
        Invalid byte sequences are shown as an \"X\" in the text column and as \
        the hex value enclosed in question marks, e.g. \"?F5?\".",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Input files. Use "-" or leave empty for stdin.
    #[arg(value_name = "FILE", default_value = "-")]
    pub files: Vec<PathBuf>,

    /// Format output using this many input characters per row.
    #[arg(
        short = 'n',
        long,
        value_name = "LENGTH",
        default_value_t = DEFAULT_ROW_WIDTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub length: usize,

    /// Interpret input in this encoding, e.g. "latin-1" or "shift_jis".
    #[arg(
        short = 'c',
        long,
        value_name = "ENC",
        default_value = "utf-8",
        value_parser = Charset::for_label
    )]
    pub encoding: Charset,

    /// Custom line template using the slots {byte}, {repr} and {data}.
    ///
    /// Slots accept a format spec such as {byte:>7} or {byte:08X}.
    /// Default is "{byte:>7}    {repr}    {data}\n".
    #[arg(short = 'e', long = "format", value_name = "FORMAT", value_parser = LineTemplate::parse)]
    pub template: Option<LineTemplate>,

    /// Log per-input statistics to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cmd_dump::run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

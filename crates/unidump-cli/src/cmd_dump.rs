/// Implementation of the dump run over every input named on the command line.
///
/// Each input gets its own decoder and formatter, so row offsets restart at
/// zero per input. Inputs that cannot be opened are reported on stderr and
/// skipped; the remaining inputs are still dumped.
///
/// ```text
/// ┌────────────────────┬───────────────────────────────────────────────┐
/// │ Input              │ Handling                                      │
/// ├────────────────────┼───────────────────────────────────────────────┤
/// │ "-"                │ locked stdin (already buffered)               │
/// │ regular file       │ BufReader<File>                               │
/// │ missing path       │ "File <name> not found." on stderr, skipped   │
/// │ directory          │ "<name> is a directory." on stderr, skipped   │
/// │ other open failure │ "cannot open <name>: <err>" on stderr, skipped│
/// └────────────────────┴───────────────────────────────────────────────┘
/// ```
///
/// Stdout is flushed after every completed row, so an interrupt never loses
/// rows that were already produced, even when the template has no newline.
use std::fs::{self, File};
use std::io::{self, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use unidump_decoder::{DumpConfig, unidump};
use unidump_format::FormatConfig;

use crate::Cli;

/// Dump every input named by `cli` to stdout.
///
/// # Errors
///
/// See [`dump_inputs`].
pub fn run(cli: &Cli) -> Result<bool> {
    let template = cli.template.clone().unwrap_or_default();
    let format = FormatConfig::new(cli.length, template).context("invalid row layout")?;
    let config = DumpConfig::new(cli.encoding, format);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = RowFlush(stdout.lock());
    dump_inputs(&cli.files, &config, &mut stdin.lock(), &mut out)
}

/// Dump `files` in order into `out`, reading `-` from `stdin`.
///
/// Returns `Ok(true)` when every input was dumped and `Ok(false)` when at
/// least one was skipped. A closed output ends the run early with
/// `Ok(true)`.
///
/// # Errors
///
/// Returns an error if reading an opened input or writing to `out` fails
/// for any reason other than a broken pipe.
pub fn dump_inputs<R: Read, W: Write>(
    files: &[PathBuf],
    config: &DumpConfig,
    stdin: &mut R,
    out: &mut W,
) -> Result<bool> {
    let mut all_ok = true;

    for path in files {
        let input = match open_input(path) {
            Ok(input) => input,
            Err(message) => {
                // Keep stdout and stderr in order on a shared terminal.
                out.flush().context("cannot write to stdout")?;
                eprintln!("{message}");
                all_ok = false;
                continue;
            }
        };

        let result = match input {
            Input::Stdin => unidump(&mut *stdin, config, out),
            Input::File(file) => unidump(file, config, out),
        };
        match result {
            Ok(summary) => debug!(
                input = %path.display(),
                bytes = summary.bytes_read,
                invalid = summary.invalid_bytes,
                rows = summary.rows,
                "input dumped"
            ),
            Err(e) if e.is_broken_pipe() => {
                debug!("stdout closed, stopping");
                return Ok(true);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("cannot dump {}", path.display()));
            }
        }
    }

    Ok(all_ok)
}

/// Flushes the wrapped writer after every write.
///
/// The formatter hands over each completed row in a single `write_all`, so
/// this flushes once per row.
struct RowFlush<W>(W);

impl<W: Write> Write for RowFlush<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_all(buf)?;
        self.0.flush()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

enum Input {
    Stdin,
    File(BufReader<File>),
}

/// Open one input, or describe why it cannot be read.
fn open_input(path: &Path) -> Result<Input, String> {
    if path.as_os_str() == "-" {
        return Ok(Input::Stdin);
    }

    // Opening a directory succeeds on some platforms; catch it up front.
    if fs::metadata(path).is_ok_and(|meta| meta.is_dir()) {
        return Err(format!("{} is a directory.", path.display()));
    }

    match File::open(path) {
        Ok(file) => Ok(Input::File(BufReader::new(file))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(format!("File {} not found.", path.display()))
        }
        Err(e) => Err(format!("cannot open {}: {e}", path.display())),
    }
}

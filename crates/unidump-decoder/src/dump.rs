use std::io::{Read, Write};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tracing::debug;
use unidump_format::{FormatConfig, LineFormatter, LineTemplate};

use crate::charset::Charset;
use crate::engine::UnitDecoder;
use crate::error::{DecodeError, DumpError};

/// Everything a dump run needs besides its input and output.
///
/// ```text
/// ┌──────────┬───────────────────────────────────────────┬─────────────────────────────────┐
/// │ Field    │ Purpose                                   │ Default                         │
/// ├──────────┼───────────────────────────────────────────┼─────────────────────────────────┤
/// │ charset  │ How input bytes are decoded               │ UTF-8                           │
/// │ format   │ Row width and line template               │ 16, "{byte:>7}    {repr}    {data}\n" │
/// └──────────┴───────────────────────────────────────────┴─────────────────────────────────┘
/// ```
///
/// Built once per invocation and only read afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DumpConfig {
    charset: Charset,
    format: FormatConfig,
}

impl DumpConfig {
    #[must_use]
    pub fn new(charset: Charset, format: FormatConfig) -> Self {
        Self { charset, format }
    }

    /// Build a configuration from raw option values, the way a command
    /// line supplies them. `template` of `None` selects the default layout.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnknownEncoding`] for an unrecognised encoding label.
    /// - [`DecodeError::Format`] for a zero row width or a malformed template.
    pub fn from_options(
        row_width: usize,
        encoding: &str,
        template: Option<&str>,
    ) -> Result<Self, DecodeError> {
        let charset = Charset::for_label(encoding)?;
        let template = match template {
            Some(source) => LineTemplate::parse(source)?,
            None => LineTemplate::default(),
        };
        let format = FormatConfig::new(row_width, template)?;
        Ok(Self::new(charset, format))
    }

    #[must_use]
    pub fn charset(&self) -> Charset {
        self.charset
    }

    #[must_use]
    pub fn format(&self) -> &FormatConfig {
        &self.format
    }
}

/// Counters describing one finished dump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub bytes_read: u64,
    /// Code points plus invalid-byte markers.
    pub units: u64,
    pub invalid_bytes: u64,
    pub rows: u64,
}

/// Runs the decode engine into the line formatter.
///
/// ```text
///   Read ──▶ UnitDecoder ──▶ DecodedUnit ──▶ LineFormatter ──▶ Write
///                 │                               │
///              Charset                       FormatConfig
/// ```
pub struct Dumper<'c> {
    config: &'c DumpConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'c> Dumper<'c> {
    #[must_use]
    pub fn new(config: &'c DumpConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Abort the run with [`DumpError::Interrupted`] once `flag` is set.
    #[must_use]
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Dump `input` into `sink` until the input is exhausted.
    ///
    /// The final partial row is written before returning and the sink is
    /// flushed. An empty input writes nothing.
    ///
    /// # Errors
    ///
    /// - [`DumpError::Io`] if reading the input fails.
    /// - [`DumpError::Format`] if writing to the sink fails.
    /// - [`DumpError::Interrupted`] if the cancel flag was raised; complete
    ///   rows already written are kept, the unfinished row is dropped.
    pub fn run<R: Read, W: Write>(&self, input: R, sink: &mut W) -> Result<DumpSummary, DumpError> {
        let mut units = UnitDecoder::new(input, self.config.charset());
        if let Some(flag) = &self.cancel {
            units = units.with_cancel(Arc::clone(flag));
        }

        let mut formatter = LineFormatter::new(self.config.format());
        let mut summary = DumpSummary::default();

        for unit in &mut units {
            let unit = unit?;
            summary.units += 1;
            if unit.is_invalid() {
                summary.invalid_bytes += 1;
            }
            formatter.append(sink, unit.offset(), unit.hex_token(), unit.display())?;
        }

        summary.bytes_read = units.bytes_consumed();
        summary.rows = formatter.finish(sink)?;
        sink.flush()?;

        debug!(
            charset = self.config.charset().name(),
            bytes = summary.bytes_read,
            units = summary.units,
            invalid = summary.invalid_bytes,
            rows = summary.rows,
            "dump finished"
        );
        Ok(summary)
    }
}

/// Dump `input` into `sink` with `config`.
///
/// Shorthand for `Dumper::new(config).run(input, sink)`.
///
/// # Example
///
/// ```rust
/// use unidump_decoder::{DumpConfig, unidump};
///
/// let config = DumpConfig::from_options(4, "utf-8", None).unwrap();
/// let mut out = Vec::new();
/// unidump(&b"\xD7"[..], &config, &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "      0    ?D7?                   X\n"
/// );
/// ```
///
/// # Errors
///
/// See [`Dumper::run`].
pub fn unidump<R: Read, W: Write>(
    input: R,
    config: &DumpConfig,
    sink: &mut W,
) -> Result<DumpSummary, DumpError> {
    Dumper::new(config).run(input, sink)
}

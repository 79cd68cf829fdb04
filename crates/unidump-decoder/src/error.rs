use unidump_format::FormatError;

/// Errors raised while building a dump configuration.
///
/// ```text
///   DecodeError
///   ├── UnknownEncoding   ← label not known to the charset table
///   ├── StatefulEncoding  ← charset needs shift state across characters
///   └── Format            ← row width or line template rejected
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The encoding label does not name a supported charset.
    #[error("unknown encoding {0:?}")]
    UnknownEncoding(String),

    /// The charset switches modes with escape sequences, so a character
    /// cannot be decoded without the bytes before it.
    #[error("encoding {0} is stateful and cannot be dumped per code point")]
    StatefulEncoding(&'static str),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors that stop a running dump.
///
/// Malformed input is never an error: undecodable bytes become `?XX?`
/// markers. Only the surrounding I/O and cancellation can end a dump early.
///
/// ```text
///   DumpError
///   ├── Io(std::io::Error)  ← the input reader failed
///   ├── Format(FormatError) ← the output sink rejected a row
///   └── Interrupted         ← the cancel flag was raised between reads
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    /// Cancellation was requested. Rows written before this point are
    /// complete; the row being filled is discarded.
    #[error("dump interrupted after {offset} bytes")]
    Interrupted { offset: u64 },
}

impl DumpError {
    /// Whether the error is the output side hanging up (`| head`, closed
    /// terminal). Callers usually treat this as a normal end of output.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            Self::Format(FormatError::Io(e)) | Self::Io(e) => {
                e.kind() == std::io::ErrorKind::BrokenPipe
            }
            _ => false,
        }
    }
}

/// Errors produced while configuring or writing dump rows.
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────────┐
/// │ Variant      │ Cause                                             │
/// ├──────────────┼───────────────────────────────────────────────────┤
/// │ ZeroRowWidth │ A row must hold at least one code point           │
/// │ Template     │ The line template could not be parsed             │
/// │ Io           │ The output sink rejected a write                  │
/// └──────────────┴───────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Row width was zero.
    #[error("row width must be at least 1")]
    ZeroRowWidth,

    /// The line template is malformed.
    ///
    /// `position` is the byte index into the template source where the
    /// problem was detected.
    #[error("invalid line template at position {position}: {reason}")]
    Template { position: usize, reason: String },

    /// I/O error while writing a formatted row.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FormatError {
    pub(crate) fn template(position: usize, reason: impl Into<String>) -> Self {
        Self::Template {
            position,
            reason: reason.into(),
        }
    }
}

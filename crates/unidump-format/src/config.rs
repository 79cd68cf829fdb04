use crate::error::FormatError;
use crate::template::LineTemplate;

/// Number of code points per row when nothing else is configured.
pub const DEFAULT_ROW_WIDTH: usize = 16;

/// Characters reserved per token in the `repr` column: four hex digits
/// plus one separating space.
const SLOT_CHARS: usize = 5;

/// Row layout settings shared by every line of a dump.
///
/// ```text
/// ┌────────────┬──────────────────────────────────────────────────────┐
/// │ Field      │ Purpose                                              │
/// ├────────────┼──────────────────────────────────────────────────────┤
/// │ row_width  │ Code points per output row (always ≥ 1)              │
/// │ template   │ Layout of one line, see [`LineTemplate`]             │
/// └────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatConfig {
    row_width: usize,
    template: LineTemplate,
}

impl FormatConfig {
    /// Build a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::ZeroRowWidth`] when `row_width` is zero.
    pub fn new(row_width: usize, template: LineTemplate) -> Result<Self, FormatError> {
        if row_width == 0 {
            return Err(FormatError::ZeroRowWidth);
        }
        Ok(Self {
            row_width,
            template,
        })
    }

    #[must_use]
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    #[must_use]
    pub fn template(&self) -> &LineTemplate {
        &self.template
    }

    /// Width the `repr` column is padded to, so the `data` column starts at
    /// the same position on a short final row as on a full one.
    #[must_use]
    pub fn repr_width(&self) -> usize {
        self.row_width.saturating_mul(SLOT_CHARS) - 1
    }
}

impl Default for FormatConfig {
    /// 16 code points per row with the default line template.
    fn default() -> Self {
        Self {
            row_width: DEFAULT_ROW_WIDTH,
            template: LineTemplate::default(),
        }
    }
}

use crate::config::FormatConfig;

/// One output row under construction.
///
/// A row is created by the first unit that lands in it and keeps that
/// unit's byte offset for its whole life. Each later unit appends one hex
/// token and one display character.
///
/// ```text
///   offset   tokens                        text
///   ──────   ───────────────────────────   ──────
///   0        ["0001","1F678","0041","0042"] ".🙸AB"
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Byte offset of the first unit in the row.
    pub offset: u64,
    /// Hex tokens in input order (`"0041"`, `"1F678"`, `"?D7?"`).
    pub tokens: Vec<String>,
    /// Display characters, one per token.
    pub text: String,
}

impl Row {
    /// Start a new row holding a single unit.
    #[must_use]
    pub fn start(offset: u64, token: String, display: char) -> Self {
        Self {
            offset,
            tokens: vec![token],
            text: display.to_string(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the row already holds `row_width` tokens.
    #[must_use]
    pub fn is_full(&self, row_width: usize) -> bool {
        self.tokens.len() >= row_width
    }

    fn push(&mut self, token: String, display: char) {
        self.tokens.push(token);
        self.text.push(display);
    }

    /// Format the row as one output line using the configured template.
    #[must_use]
    pub fn render(&self, config: &FormatConfig) -> String {
        let repr = format!("{:<width$}", self.tokens.join(" "), width = config.repr_width());
        config.template().render(self.offset, &repr, &self.text)
    }
}

/// Feed one unit into the current row.
///
/// Returns the row that is current afterwards, plus the previous row when it
/// was already full and must be written before anything else.
///
/// ```text
///   None           + unit ──▶ (Row[unit], None)
///   Row (filling)  + unit ──▶ (Row[.., unit], None)
///   Row (full)     + unit ──▶ (Row[unit], Some(full row))
/// ```
#[must_use]
pub fn append_unit(
    row: Option<Row>,
    offset: u64,
    token: String,
    display: char,
    row_width: usize,
) -> (Row, Option<Row>) {
    match row {
        None => (Row::start(offset, token, display), None),
        Some(full) if full.is_full(row_width) => (Row::start(offset, token, display), Some(full)),
        Some(mut filling) => {
            filling.push(token, display);
            (filling, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::LineTemplate;

    fn width(n: usize) -> FormatConfig {
        FormatConfig::new(n, LineTemplate::default()).unwrap()
    }

    #[test]
    fn first_unit_starts_row() {
        let (row, done) = append_unit(None, 0, "0076".into(), 'v', 2);
        assert_eq!(row, Row::start(0, "0076".into(), 'v'));
        assert!(done.is_none());
    }

    #[test]
    fn full_row_is_handed_back_before_new_one_starts() {
        let (row, _) = append_unit(None, 0, "0076".into(), 'v', 2);
        let (row, done) = append_unit(Some(row), 1, "0076".into(), 'v', 2);
        assert!(done.is_none());
        assert!(row.is_full(2));

        let (row, done) = append_unit(Some(row), 2, "0077".into(), 'w', 2);
        let done = done.expect("full row should be completed");
        assert_eq!(done.offset, 0);
        assert_eq!(done.tokens, ["0076", "0076"]);
        assert_eq!(done.text, "vv");
        assert_eq!(row, Row::start(2, "0077".into(), 'w'));
    }

    #[test]
    fn offset_is_fixed_at_creation() {
        let (row, _) = append_unit(None, 5, "0041".into(), 'A', 4);
        let (row, _) = append_unit(Some(row), 9, "0042".into(), 'B', 4);
        assert_eq!(row.offset, 5);
    }

    #[test]
    fn render_pads_repr_column() {
        let row = Row {
            offset: 0,
            tokens: vec!["00A0".into(), "00B0".into(), "00C0".into()],
            text: "ABC".into(),
        };
        assert_eq!(row.render(&width(4)), "      0    00A0 00B0 00C0         ABC\n");
    }

    #[test]
    fn render_wide_token_shifts_nothing_when_row_is_short() {
        let row = Row {
            offset: 12,
            tokens: vec!["00A0".into(), "1F678".into(), "00C0".into()],
            text: "A🙸C".into(),
        };
        assert_eq!(row.render(&width(4)), "     12    00A0 1F678 00C0        A🙸C\n");
    }
}

use std::io::Write;

use crate::config::FormatConfig;
use crate::error::FormatError;
use crate::row::{Row, append_unit};

/// Batches decoded units into rows and writes completed rows to a sink.
///
/// The formatter owns no sink; every call that may write takes one, so the
/// same formatter can be driven from any `Write` implementation. Rows are
/// written whole, never partially.
///
/// ```text
/// append(offset, token, ch) ──▶ append_unit() ──▶ completed row? ──▶ sink
///                                                      │
/// finish() ───────────────────────────────────────────-┴──▶ last row ──▶ sink
/// ```
pub struct LineFormatter<'a> {
    config: &'a FormatConfig,
    row: Option<Row>,
    rows_written: u64,
}

impl<'a> LineFormatter<'a> {
    #[must_use]
    pub fn new(config: &'a FormatConfig) -> Self {
        Self {
            config,
            row: None,
            rows_written: 0,
        }
    }

    /// Add one unit, writing the previous row first if it was full.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Io`] if the sink rejects the write.
    pub fn append<W: Write>(
        &mut self,
        sink: &mut W,
        offset: u64,
        token: String,
        display: char,
    ) -> Result<(), FormatError> {
        let (current, completed) =
            append_unit(self.row.take(), offset, token, display, self.config.row_width());
        self.row = Some(current);
        if let Some(row) = completed {
            self.write_row(sink, &row)?;
        }
        Ok(())
    }

    /// The row currently being filled, if any unit has arrived since the
    /// last write.
    #[must_use]
    pub fn pending(&self) -> Option<&Row> {
        self.row.as_ref()
    }

    #[must_use]
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Write the last row, if there is one, and return the total number of
    /// rows written. A formatter that never received a unit writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Io`] if the sink rejects the write.
    pub fn finish<W: Write>(mut self, sink: &mut W) -> Result<u64, FormatError> {
        if let Some(row) = self.row.take() {
            self.write_row(sink, &row)?;
        }
        Ok(self.rows_written)
    }

    fn write_row<W: Write>(&mut self, sink: &mut W, row: &Row) -> Result<(), FormatError> {
        sink.write_all(row.render(self.config).as_bytes())?;
        self.rows_written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::LineTemplate;

    fn render_all(width: usize, units: &[(u64, &str, char)]) -> (String, u64) {
        let config = FormatConfig::new(width, LineTemplate::default()).unwrap();
        let mut sink = Vec::new();
        let mut formatter = LineFormatter::new(&config);
        for &(offset, token, ch) in units {
            formatter.append(&mut sink, offset, token.to_string(), ch).unwrap();
        }
        let rows = formatter.finish(&mut sink).unwrap();
        (String::from_utf8(sink).unwrap(), rows)
    }

    #[test]
    fn nothing_appended_writes_nothing() {
        let (out, rows) = render_all(4, &[]);
        assert_eq!(out, "");
        assert_eq!(rows, 0);
    }

    #[test]
    fn row_is_written_only_when_next_unit_arrives() {
        let config = FormatConfig::new(2, LineTemplate::default()).unwrap();
        let mut sink = Vec::new();
        let mut formatter = LineFormatter::new(&config);

        formatter.append(&mut sink, 0, "0076".into(), 'v').unwrap();
        formatter.append(&mut sink, 1, "0076".into(), 'v').unwrap();
        assert!(sink.is_empty(), "a full row waits for the next unit");

        formatter.append(&mut sink, 2, "0077".into(), 'w').unwrap();
        assert_eq!(String::from_utf8_lossy(&sink), "      0    0076 0076    vv\n");
        assert_eq!(formatter.pending().map(|r| r.offset), Some(2));
        assert_eq!(formatter.rows_written(), 1);
    }

    #[test]
    fn final_partial_row_keeps_columns_aligned() {
        let (out, rows) = render_all(
            2,
            &[(0, "0041", 'A'), (1, "0042", 'B'), (2, "0043", 'C')],
        );
        assert_eq!(out, "      0    0041 0042    AB\n      2    0043         C\n");
        assert_eq!(rows, 2);
    }

    #[test]
    fn width_one_writes_one_row_per_unit() {
        let (out, rows) = render_all(1, &[(0, "0041", 'A'), (1, "?FF?", 'X')]);
        assert_eq!(out, "      0    0041    A\n      1    ?FF?    X\n");
        assert_eq!(rows, 2);
    }

    #[test]
    fn custom_template_is_applied() {
        let config = FormatConfig::new(3, LineTemplate::parse("{data}").unwrap()).unwrap();
        let mut sink = Vec::new();
        let mut formatter = LineFormatter::new(&config);
        for (i, ch) in "hello".chars().enumerate() {
            formatter
                .append(&mut sink, i as u64, format!("{:04X}", ch as u32), ch)
                .unwrap();
        }
        formatter.finish(&mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "hello");
    }
}

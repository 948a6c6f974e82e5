//! Colored terminal output

use std::io::Write;

use anyhow::Result;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::model::{Row, COLUMNS};
use crate::validate::Outcome;

use super::{EmptyReport, ReportFormatter, SameReport};

/// Rows listed per section before the rest are summarized
const DEFAULT_ROW_LIMIT: usize = 20;

/// Terminal output with colors
pub struct TerminalOutput {
    row_limit: usize,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }

    pub fn with_row_limit(row_limit: usize) -> Self {
        Self { row_limit }
    }

    fn write_header(&self, writer: &mut dyn WriteColor, title: &str) -> Result<()> {
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer, " cqlfixture: {}", title)?;
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        Ok(())
    }

    fn write_status(&self, writer: &mut dyn WriteColor, ok: bool, message: &str) -> Result<()> {
        let (label, color) = if ok { ("PASS", Color::Green) } else { ("FAIL", Color::Red) };
        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(writer, "{}", label)?;
        writer.reset()?;
        writeln!(writer, " {}", message)?;
        Ok(())
    }

    fn write_rows(&self, writer: &mut dyn WriteColor, title: &str, rows: &[Row]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        writeln!(writer)?;
        writeln!(writer, "{} ({}):", title, rows.len())?;

        let shown = rows.len().min(self.row_limit);
        let mut table_data: Vec<Vec<String>> = Vec::with_capacity(shown + 1);
        table_data.push(COLUMNS.iter().map(|c| c.to_string()).collect());
        for row in &rows[..shown] {
            table_data.push(row.values().iter().map(|v| v.to_string()).collect());
        }
        write!(writer, "{}", build_table(&table_data))?;

        if rows.len() > shown {
            writeln!(writer, "  ... and {} more", rows.len() - shown)?;
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TerminalOutput {
    fn render_same(&self, report: &SameReport<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_header(
            writer,
            &format!("{} ⇔ {}", report.source.display(), report.table),
        )?;

        let stats = report.outcome.stats();
        writeln!(
            writer,
            "File: {} rows ({} distinct)   Table: {} rows",
            stats.expected_rows, stats.expected_distinct, stats.actual_rows
        )?;
        if stats.duplicate_rows > 0 {
            writeln!(
                writer,
                "Note: {} duplicate file rows collapse onto existing keys",
                stats.duplicate_rows
            )?;
        }

        match report.outcome {
            Outcome::Match(_) => {
                self.write_status(writer, true, "table contents match the file")?;
            }
            Outcome::Mismatch {
                details,
                dumped_path,
            } => {
                self.write_status(
                    writer,
                    false,
                    &format!(
                        "{} missing, {} unexpected; table contents written to {}",
                        stats.missing,
                        stats.unexpected,
                        dumped_path.display()
                    ),
                )?;
                self.write_rows(writer, "Missing from table", &details.diff.missing)?;
                self.write_rows(writer, "Not in file", &details.diff.unexpected)?;
            }
        }
        Ok(())
    }

    fn render_empty(&self, report: &EmptyReport<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_header(writer, &format!("{} is empty?", report.table))?;
        if report.is_empty() {
            self.write_status(writer, true, "table has no rows")
        } else {
            self.write_status(writer, false, &format!("table has {} rows", report.rows))
        }
    }
}

/// Build a box-drawn table; the first row is the header
fn build_table(data: &[Vec<String>]) -> String {
    if data.is_empty() || data[0].is_empty() {
        return String::new();
    }

    let mut col_widths: Vec<usize> = vec![0; data[0].len()];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = col_widths.get_mut(i) {
                *width = (*width).max(cell.len());
            }
        }
    }

    let border = |left: char, mid: char, right: char| {
        let segments: Vec<String> = col_widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid.to_string().as_str()), right)
    };
    let line = |row: &[String]| {
        let mut out = String::from("│");
        for (i, cell) in row.iter().enumerate() {
            let width = col_widths.get(i).copied().unwrap_or(0);
            out.push_str(&format!(" {:>width$} │", cell, width = width));
        }
        out.push('\n');
        out
    };

    let mut output = border('┌', '┬', '┐');
    output.push_str(&line(&data[0]));
    output.push_str(&border('├', '┼', '┤'));
    for row in &data[1..] {
        output.push_str(&line(row));
    }
    output.push_str(&border('└', '┴', '┘'));
    output
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use termcolor::NoColor;

    use super::*;
    use crate::model::TableRef;
    use crate::validate::{CompareStats, Mismatch, RowDiff};

    fn render(outcome: &Outcome, formatter: &TerminalOutput) -> String {
        let table = TableRef::new("ks1", "t1");
        let report = SameReport {
            table: &table,
            source: Path::new("out.csv"),
            outcome,
        };
        let mut out = NoColor::new(Vec::new());
        formatter.render_same(&report, &mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_match_report() {
        let outcome = Outcome::Match(CompareStats {
            expected_rows: 5,
            actual_rows: 5,
            expected_distinct: 5,
            actual_distinct: 5,
            ..Default::default()
        });
        let text = render(&outcome, &TerminalOutput::new());
        assert!(text.contains("out.csv ⇔ ks1.t1"));
        assert!(text.contains("PASS table contents match the file"));
    }

    #[test]
    fn test_mismatch_report_lists_rows_up_to_limit() {
        let missing: Vec<Row> = (0..3).map(|i| Row::new(i, -i, 10, 100)).collect();
        let outcome = Outcome::Mismatch {
            details: Mismatch {
                stats: CompareStats {
                    missing: 3,
                    ..Default::default()
                },
                diff: RowDiff {
                    missing,
                    unexpected: Vec::new(),
                },
            },
            dumped_path: PathBuf::from("bad_contents.csv"),
        };
        let text = render(&outcome, &TerminalOutput::with_row_limit(2));
        assert!(text.contains(
            "FAIL 3 missing, 0 unexpected; table contents written to bad_contents.csv"
        ));
        assert!(text.contains("Missing from table (3):"));
        assert!(text.contains("│   1 │  -1 │  10 │  100 │"));
        assert!(text.contains("... and 1 more"));
        assert!(!text.contains("Not in file"));
    }

    #[test]
    fn test_empty_report() {
        let table = TableRef::new("ks1", "t1");
        let mut out = NoColor::new(Vec::new());
        TerminalOutput::new()
            .render_empty(&EmptyReport { table: &table, rows: 2 }, &mut out)
            .unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("FAIL table has 2 rows"));
    }
}

//! JSON output format

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::model::Row;
use crate::validate::{CompareStats, Outcome};

use super::{EmptyReport, ReportFormatter, SameReport};

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    fn write<T: Serialize>(&self, value: &T, writer: &mut dyn WriteColor) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonSameReport<'a> {
    command: &'static str,
    keyspace: &'a str,
    table: &'a str,
    file: String,
    result: &'static str,
    stats: &'a CompareStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    dumped_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<&'a [Row]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unexpected: Option<&'a [Row]>,
}

#[derive(Serialize)]
struct JsonEmptyReport<'a> {
    command: &'static str,
    keyspace: &'a str,
    table: &'a str,
    result: &'static str,
    rows: usize,
}

fn result_label(ok: bool) -> &'static str {
    if ok {
        "pass"
    } else {
        "fail"
    }
}

impl ReportFormatter for JsonOutput {
    fn render_same(&self, report: &SameReport<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        let (dumped_path, missing, unexpected) = match report.outcome {
            Outcome::Match(_) => (None, None, None),
            Outcome::Mismatch {
                details,
                dumped_path,
            } => (
                Some(dumped_path.display().to_string()),
                Some(details.diff.missing.as_slice()),
                Some(details.diff.unexpected.as_slice()),
            ),
        };

        let output = JsonSameReport {
            command: "validate_same",
            keyspace: &report.table.keyspace,
            table: &report.table.table,
            file: report.source.display().to_string(),
            result: result_label(report.outcome.is_match()),
            stats: report.outcome.stats(),
            dumped_path,
            missing,
            unexpected,
        };
        self.write(&output, writer)
    }

    fn render_empty(&self, report: &EmptyReport<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        let output = JsonEmptyReport {
            command: "validate_empty",
            keyspace: &report.table.keyspace,
            table: &report.table.table,
            result: result_label(report.is_empty()),
            rows: report.rows,
        };
        self.write(&output, writer)
    }
}

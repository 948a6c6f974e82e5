//! Output formatting for validation reports

mod json;
mod terminal;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::config::OutputFormat;
use crate::model::TableRef;
use crate::validate::Outcome;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// A finished `validate_same` run
#[derive(Debug, Clone, Copy)]
pub struct SameReport<'a> {
    pub table: &'a TableRef,
    pub source: &'a Path,
    pub outcome: &'a Outcome,
}

/// A finished `validate_empty` run
#[derive(Debug, Clone, Copy)]
pub struct EmptyReport<'a> {
    pub table: &'a TableRef,
    pub rows: usize,
}

impl EmptyReport<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Trait for report formatters
pub trait ReportFormatter {
    fn render_same(&self, report: &SameReport<'_>, writer: &mut dyn WriteColor) -> Result<()>;

    fn render_empty(&self, report: &EmptyReport<'_>, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating report formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create a formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

fn stdout() -> StandardStream {
    let choice = if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Render a `validate_same` report to stdout
pub fn render_same_to_stdout(report: &SameReport<'_>, format: OutputFormat) -> Result<()> {
    OutputFactory::create(format).render_same(report, &mut stdout())
}

/// Render a `validate_empty` report to stdout
pub fn render_empty_to_stdout(report: &EmptyReport<'_>, format: OutputFormat) -> Result<()> {
    OutputFactory::create(format).render_empty(report, &mut stdout())
}

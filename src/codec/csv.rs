//! CSV reader and writer for fixture datasets

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::FixtureError;
use crate::model::{Dataset, Row, COLUMN_COUNT};

/// Write the header and then one line per row
pub fn write_to<W: Write>(writer: W, dataset: &Dataset) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer
        .write_record(&dataset.header)
        .context("Failed to write CSV header")?;

    for row in &dataset.rows {
        csv_writer
            .write_record(row.values().iter().map(|v| v.to_string()))
            .with_context(|| format!("Failed to write CSV row {}", row))?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Serialize a dataset to CSV text
pub fn write(dataset: &Dataset) -> Result<String> {
    let mut buf = Vec::new();
    write_to(&mut buf, dataset)?;
    String::from_utf8(buf).context("CSV output is not valid UTF-8")
}

/// Write a dataset to a file, replacing any previous contents
pub fn write_path(path: &Path, dataset: &Dataset) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    write_to(BufWriter::new(file), dataset)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))
}

/// Parse CSV: the first line is the header, every other non-empty line is a row
///
/// Line numbers in errors count physical lines from 1, so CRLF endings and
/// skipped blank lines do not shift them. Fields may not span lines.
pub fn read_from<R: Read>(mut reader: R) -> Result<Dataset> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read CSV input")?;

    let mut lines = text.lines().zip(1u64..);

    let header: Vec<String> = match lines.next() {
        Some((first, line)) => split_line(first, line)
            .context("Failed to read CSV header")?
            .iter()
            .map(|h| h.to_string())
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for (text_line, line) in lines {
        if text_line.trim().is_empty() {
            continue;
        }
        let record = split_line(text_line, line)?;
        rows.push(parse_row(&record, line)?);
    }

    Ok(Dataset::with_header(header, rows))
}

/// Parse CSV text
pub fn read(text: &str) -> Result<Dataset> {
    read_from(text.as_bytes())
}

/// Parse a CSV file
pub fn read_path(path: &Path) -> Result<Dataset> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    read_from(BufReader::new(file))
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))
}

fn split_line(text: &str, line: u64) -> Result<csv::StringRecord> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut record = csv::StringRecord::new();
    csv_reader
        .read_record(&mut record)
        .with_context(|| format!("Failed to read CSV line {}", line))?;
    Ok(record)
}

fn parse_row(record: &csv::StringRecord, line: u64) -> Result<Row, FixtureError> {
    if record.len() != COLUMN_COUNT {
        return Err(FixtureError::RowWidth {
            line,
            found: record.len(),
        });
    }

    let mut values = [0i32; COLUMN_COUNT];
    for (slot, field) in values.iter_mut().zip(record.iter()) {
        *slot = field.parse().map_err(|_| FixtureError::InvalidField {
            line,
            field: field.to_string(),
        })?;
    }
    Ok(Row(values))
}

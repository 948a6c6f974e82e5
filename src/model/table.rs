//! Row and Dataset data structures

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

use super::schema::{COLUMNS, COLUMN_COUNT};

/// One fixture row: `foo, bar, baz, quux`
///
/// Rows order lexicographically by column, which is what the validators sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Row(pub [i32; COLUMN_COUNT]);

impl Row {
    pub fn new(foo: i32, bar: i32, baz: i32, quux: i32) -> Self {
        Row([foo, bar, baz, quux])
    }

    /// Cell values in column order
    pub fn values(&self) -> &[i32; COLUMN_COUNT] {
        &self.0
    }

    /// Bind values for a prepared INSERT
    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        let [a, b, c, d] = self.0;
        (a, b, c, d)
    }
}

impl From<(i32, i32, i32, i32)> for Row {
    fn from((a, b, c, d): (i32, i32, i32, i32)) -> Self {
        Row([a, b, c, d])
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{},{},{},{}", a, b, c, d)
    }
}

/// An ordered sequence of rows plus the header they were read with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Header line; metadata, never compared
    pub header: Vec<String>,
    /// Rows in file or result-set order
    pub rows: Vec<Row>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Dataset {
    /// Create a dataset with the standard header
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            header: COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Create a dataset with an explicit header
    pub fn with_header(header: Vec<String>, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows sorted and deduplicated: the set the store would hold
    pub fn distinct_sorted(&self) -> Vec<Row> {
        let mut rows = self.rows.clone();
        rows.sort_unstable();
        rows.dedup();
        rows
    }

    /// Rows that occur more than once, with their occurrence count, in first-seen order
    pub fn duplicates(&self) -> Vec<(Row, usize)> {
        let mut counts: IndexMap<Row, usize, FxBuildHasher> = IndexMap::default();
        for row in &self.rows {
            *counts.entry(*row).or_insert(0) += 1;
        }
        counts.into_iter().filter(|(_, n)| *n > 1).collect()
    }
}

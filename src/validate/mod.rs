//! Order-independent comparison of a CSV dataset against table contents

mod row_diff;

use std::path::PathBuf;

use serde::Serialize;

use crate::model::{Dataset, Row};

pub use row_diff::{diff_sorted, RowDiff};

/// Counts describing one comparison
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CompareStats {
    /// Rows read from the CSV file
    pub expected_rows: usize,
    /// Rows read from the table
    pub actual_rows: usize,
    /// Distinct CSV rows
    pub expected_distinct: usize,
    /// Distinct table rows
    pub actual_distinct: usize,
    /// CSV rows that occur more than once
    pub duplicate_rows: usize,
    pub missing: usize,
    pub unexpected: usize,
}

/// What differed between the file and the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub stats: CompareStats,
    pub diff: RowDiff,
}

/// Result of comparing two datasets as sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Match(CompareStats),
    Mismatch(Mismatch),
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        matches!(self, Comparison::Match(_))
    }
}

/// Outcome of `validate_same`: a match, or a mismatch plus where the table contents were dumped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Match(CompareStats),
    Mismatch {
        details: Mismatch,
        dumped_path: PathBuf,
    },
}

impl Outcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match(_))
    }

    pub fn stats(&self) -> &CompareStats {
        match self {
            Outcome::Match(stats) => stats,
            Outcome::Mismatch { details, .. } => &details.stats,
        }
    }
}

/// Compare as sets: sort, drop duplicates, then walk both sides
pub fn compare(expected: &Dataset, actual: &Dataset) -> Comparison {
    let expected_set: Vec<Row> = expected.distinct_sorted();
    let actual_set: Vec<Row> = actual.distinct_sorted();
    let diff = diff_sorted(&expected_set, &actual_set);

    let stats = CompareStats {
        expected_rows: expected.row_count(),
        actual_rows: actual.row_count(),
        expected_distinct: expected_set.len(),
        actual_distinct: actual_set.len(),
        duplicate_rows: expected.row_count() - expected_set.len(),
        missing: diff.missing.len(),
        unexpected: diff.unexpected.len(),
    };

    if diff.missing.is_empty() && diff.unexpected.is_empty() {
        Comparison::Match(stats)
    } else {
        Comparison::Mismatch(Mismatch { stats, diff })
    }
}

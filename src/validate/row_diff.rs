//! Sorted row matching

use std::cmp::Ordering;

use crate::model::Row;

/// Rows present on only one side of a comparison
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowDiff {
    /// In the expected set but not the actual one
    pub missing: Vec<Row>,
    /// In the actual set but not the expected one
    pub unexpected: Vec<Row>,
}

/// Walk two sorted, deduplicated row lists in step
pub fn diff_sorted(expected: &[Row], actual: &[Row]) -> RowDiff {
    let mut diff = RowDiff::default();
    let (mut i, mut j) = (0, 0);

    while i < expected.len() && j < actual.len() {
        match expected[i].cmp(&actual[j]) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                diff.missing.push(expected[i]);
                i += 1;
            }
            Ordering::Greater => {
                diff.unexpected.push(actual[j]);
                j += 1;
            }
        }
    }
    diff.missing.extend_from_slice(&expected[i..]);
    diff.unexpected.extend_from_slice(&actual[j..]);

    diff
}

//! The four fixture workflows: generate, load, validate_same, validate_empty
//!
//! Each takes the store explicitly; one invocation runs exactly one workflow.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::codec::csv;
use crate::config::{GenerateOptions, OutputTarget};
use crate::error::FixtureError;
use crate::model::{Dataset, TableRef, TableSchema};
use crate::store::Store;
use crate::validate::{self, Comparison, Outcome};

/// Create the keyspace and table, then write a random dataset as CSV
pub async fn generate(
    store: &dyn Store,
    table: &TableRef,
    options: &GenerateOptions,
) -> Result<Dataset> {
    store
        .create_keyspace(&table.keyspace)
        .await
        .with_context(|| format!("Failed to create keyspace {}", table.keyspace))?;
    store
        .create_table(table)
        .await
        .with_context(|| format!("Failed to create table {}", table))?;

    let dataset = crate::generate::generate(options.row_count, options.range, options.seed);

    let duplicates = dataset.duplicates();
    if !duplicates.is_empty() {
        let extra: usize = duplicates.iter().map(|(_, n)| n - 1).sum();
        tracing::warn!(
            duplicated_keys = duplicates.len(),
            extra,
            "generated rows share a primary key; the table will hold one copy of each"
        );
    }

    match &options.output {
        OutputTarget::Stdout => csv::write_to(io::stdout().lock(), &dataset)?,
        OutputTarget::File(path) => csv::write_path(path, &dataset)?,
    }
    tracing::info!(rows = dataset.row_count(), "generated dataset");

    Ok(dataset)
}

/// Insert every row of `dataset` into the table
pub async fn load(store: &dyn Store, dataset: &Dataset, table: &TableRef) -> Result<usize> {
    warn_on_header(dataset);
    let inserted = store
        .insert_rows(table, &dataset.rows)
        .await
        .with_context(|| format!("Failed to load rows into {}", table))?;
    tracing::info!(rows = inserted, %table, "loaded");
    Ok(inserted)
}

/// Compare `expected` with the table's contents as sets
///
/// On mismatch the table's contents are written to `dump_path` and the
/// mismatch is returned, not raised.
pub async fn validate_same(
    store: &dyn Store,
    expected: &Dataset,
    table: &TableRef,
    dump_path: &Path,
) -> Result<Outcome> {
    warn_on_header(expected);
    let actual = store
        .select_all(table)
        .await
        .with_context(|| format!("Failed to read {}", table))?;

    match validate::compare(expected, &actual) {
        Comparison::Match(stats) => {
            tracing::info!(rows = stats.actual_rows, %table, "contents match");
            Ok(Outcome::Match(stats))
        }
        Comparison::Mismatch(details) => {
            tracing::error!(
                missing = details.stats.missing,
                unexpected = details.stats.unexpected,
                %table,
                "contents differ"
            );
            csv::write_path(dump_path, &actual)?;
            tracing::info!(path = %dump_path.display(), "wrote table contents");
            Ok(Outcome::Mismatch {
                details,
                dumped_path: dump_path.to_path_buf(),
            })
        }
    }
}

/// Fail with [`FixtureError::TableNotEmpty`] unless the table has no rows
pub async fn validate_empty(store: &dyn Store, table: &TableRef) -> Result<()> {
    let actual = store
        .select_all(table)
        .await
        .with_context(|| format!("Failed to read {}", table))?;

    if !actual.is_empty() {
        return Err(FixtureError::TableNotEmpty {
            table: table.to_string(),
            rows: actual.row_count(),
        }
        .into());
    }
    tracing::info!(%table, "table is empty");
    Ok(())
}

/// How a workflow run should end the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    ValidationFailed,
}

/// Exit code for any failure that is not a validation failure
pub const ERROR_EXIT_CODE: u8 = 2;

impl Status {
    pub fn exit_code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::ValidationFailed => 1,
        }
    }
}

impl From<&Outcome> for Status {
    fn from(outcome: &Outcome) -> Self {
        if outcome.is_match() {
            Status::Success
        } else {
            Status::ValidationFailed
        }
    }
}

/// Result of [`validate_empty_report`]: the row count found and the status it implies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCheck {
    pub rows: usize,
    pub status: Status,
}

/// Run [`validate_empty`] and turn a non-empty table into a failed status
///
/// Errors other than [`FixtureError::TableNotEmpty`] are returned unchanged.
pub async fn validate_empty_report(store: &dyn Store, table: &TableRef) -> Result<EmptyCheck> {
    match validate_empty(store, table).await {
        Ok(()) => Ok(EmptyCheck {
            rows: 0,
            status: Status::Success,
        }),
        Err(e) => match e.downcast_ref::<FixtureError>() {
            Some(FixtureError::TableNotEmpty { rows, .. }) => Ok(EmptyCheck {
                rows: *rows,
                status: Status::ValidationFailed,
            }),
            _ => Err(e),
        },
    }
}

fn warn_on_header(dataset: &Dataset) {
    let expected = TableSchema::fixed().header();
    if dataset.header != expected {
        tracing::warn!(
            found = %dataset.header.join(","),
            expected = %expected.join(","),
            "unexpected CSV header; columns are read positionally"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueRange;
    use crate::model::Row;
    use crate::store::MemoryStore;

    fn options(path: &Path, rows: usize) -> GenerateOptions {
        GenerateOptions::default()
            .with_output(OutputTarget::File(path.to_path_buf()))
            .with_row_count(rows)
            .with_seed(Some(42))
    }

    #[tokio::test]
    async fn test_generate_creates_schema_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let store = MemoryStore::new();
        let table = TableRef::new("ks1", "t1");

        generate(&store, &table, &options(&out, 5)).await.unwrap();

        assert!(store.has_keyspace("ks1"));
        assert!(store.has_table(&table));
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 6);
        assert_eq!(text.lines().next(), Some("foo,bar,baz,quux"));
    }

    #[tokio::test]
    async fn test_generate_keeps_duplicate_keys() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let store = MemoryStore::new();
        let table = TableRef::new("ks1", "t1");
        let options = options(&out, 4).with_range(ValueRange::new(7, 7).unwrap());

        let dataset = generate(&store, &table, &options).await.unwrap();

        assert_eq!(dataset.row_count(), 4);
        assert_eq!(dataset.duplicates().len(), 1);
        assert_eq!(csv::read_path(&out).unwrap().rows, vec![Row::new(7, 7, 7, 7); 4]);
    }

    #[tokio::test]
    async fn test_generate_twice_fails_on_existing_keyspace() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let table = TableRef::new("ks1", "t1");
        generate(&store, &table, &options(&dir.path().join("a.csv"), 1))
            .await
            .unwrap();

        let err = generate(&store, &table, &options(&dir.path().join("b.csv"), 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FixtureError>(),
            Some(FixtureError::KeyspaceExists(_))
        ));
    }

    #[tokio::test]
    async fn test_load_then_validate_same_matches() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let dump = dir.path().join("bad_contents.csv");
        let store = MemoryStore::new();
        let table = TableRef::new("ks1", "t1");

        generate(&store, &table, &options(&out, 5)).await.unwrap();

        let dataset = csv::read_path(&out).unwrap();
        assert_eq!(load(&store, &dataset, &table).await.unwrap(), 5);

        let outcome = validate_same(&store, &dataset, &table, &dump).await.unwrap();
        assert!(outcome.is_match());
        assert!(!dump.exists());
    }

    #[tokio::test]
    async fn test_validate_same_dumps_on_missing_row() {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("bad_contents.csv");
        let store = MemoryStore::new();
        let table = TableRef::new("ks1", "t1");
        store.create_keyspace("ks1").await.unwrap();
        store.create_table(&table).await.unwrap();

        let rows: Vec<Row> = (0..5).map(|i| Row::new(i, i, i, i)).collect();
        let dataset = Dataset::new(rows.clone());
        load(&store, &dataset, &table).await.unwrap();
        assert!(store.delete_row(&table, &rows[2]).unwrap());

        let outcome = validate_same(&store, &dataset, &table, &dump).await.unwrap();
        match outcome {
            Outcome::Mismatch { details, dumped_path } => {
                assert_eq!(details.diff.missing, vec![rows[2]]);
                assert_eq!(dumped_path, dump);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }

        let dumped = csv::read_path(&dump).unwrap();
        assert_eq!(dumped.row_count(), 4);
        assert!(!dumped.rows.contains(&rows[2]));
    }

    #[tokio::test]
    async fn test_validate_empty() {
        let store = MemoryStore::new();
        let table = TableRef::new("ks1", "t1");
        store.create_keyspace("ks1").await.unwrap();
        store.create_table(&table).await.unwrap();

        validate_empty(&store, &table).await.unwrap();
        validate_empty(&store, &table).await.unwrap();

        store
            .insert_rows(&table, &[Row::new(1, 2, 3, 4)])
            .await
            .unwrap();
        let err = validate_empty(&store, &table).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FixtureError>(),
            Some(FixtureError::TableNotEmpty { rows: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_validate_empty_report_statuses() {
        let store = MemoryStore::new();
        let table = TableRef::new("ks1", "t1");
        store.create_keyspace("ks1").await.unwrap();
        store.create_table(&table).await.unwrap();

        let check = validate_empty_report(&store, &table).await.unwrap();
        assert_eq!(
            check,
            EmptyCheck {
                rows: 0,
                status: Status::Success
            }
        );
        assert_eq!(check.status.exit_code(), 0);

        store
            .insert_rows(&table, &[Row::new(1, 2, 3, 4), Row::new(5, 6, 7, 8)])
            .await
            .unwrap();
        let check = validate_empty_report(&store, &table).await.unwrap();
        assert_eq!(check.rows, 2);
        assert_eq!(check.status, Status::ValidationFailed);
        assert_eq!(check.status.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_validate_empty_report_passes_other_errors_through() {
        let store = MemoryStore::new();
        let table = TableRef::new("ks1", "missing");
        store.create_keyspace("ks1").await.unwrap();

        let err = validate_empty_report(&store, &table).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FixtureError>(),
            Some(FixtureError::UnknownTable(_))
        ));
    }

    #[tokio::test]
    async fn test_status_from_validate_same_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("bad_contents.csv");
        let store = MemoryStore::new();
        let table = TableRef::new("ks1", "t1");
        store.create_keyspace("ks1").await.unwrap();
        store.create_table(&table).await.unwrap();

        let dataset = Dataset::new(vec![Row::new(1, 1, 1, 1), Row::new(2, 2, 2, 2)]);
        load(&store, &dataset, &table).await.unwrap();
        let outcome = validate_same(&store, &dataset, &table, &dump).await.unwrap();
        assert_eq!(Status::from(&outcome), Status::Success);

        store
            .insert_rows(&table, &[Row::new(3, 3, 3, 3)])
            .await
            .unwrap();
        let outcome = validate_same(&store, &dataset, &table, &dump).await.unwrap();
        assert_eq!(Status::from(&outcome), Status::ValidationFailed);
        assert_eq!(Status::from(&outcome).exit_code(), 1);
        assert_ne!(ERROR_EXIT_CODE, Status::ValidationFailed.exit_code());
    }
}

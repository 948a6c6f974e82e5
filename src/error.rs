//! Typed errors for cqlfixture operations

use thiserror::Error;

/// Errors raised by the codec, generator, store and validators
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("line {line}: field {field:?} is not an integer")]
    InvalidField { line: u64, field: String },

    #[error("line {line}: expected 4 fields, found {found}")]
    RowWidth { line: u64, found: usize },

    #[error("invalid value range: min {min} is greater than max {max}")]
    InvalidRange { min: i32, max: i32 },

    #[error("keyspace {0} already exists")]
    KeyspaceExists(String),

    #[error("table {0} already exists")]
    TableExists(String),

    #[error("keyspace {0} does not exist")]
    UnknownKeyspace(String),

    #[error("table {0} does not exist")]
    UnknownTable(String),

    #[error("table {table} is not empty: found {rows} rows")]
    TableNotEmpty { table: String, rows: usize },
}

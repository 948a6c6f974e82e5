//! Fixed table schema and table addressing

use std::fmt;

/// Column names of the fixture table, in CSV and CQL order
pub const COLUMNS: [&str; COLUMN_COUNT] = ["foo", "bar", "baz", "quux"];

/// Number of columns in every fixture row
pub const COLUMN_COUNT: usize = 4;

/// CQL type of every column
pub const CQL_TYPE: &str = "int";

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Column index (0-based position)
    pub index: usize,
    /// Part of the primary key
    pub primary_key: bool,
}

impl Column {
    /// Create a new key column with name and index
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            primary_key: true,
        }
    }
}

/// Schema of the fixture table: four `int` columns, all in the primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: Vec<Column>,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::fixed()
    }
}

impl TableSchema {
    /// The only schema this tool knows about
    pub fn fixed() -> Self {
        Self {
            columns: COLUMNS
                .iter()
                .enumerate()
                .map(|(i, name)| Column::new(*name, i))
                .collect(),
        }
    }

    /// Column names in order
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// `foo int, bar int, ...` for CREATE TABLE
    pub fn column_definitions(&self) -> String {
        self.columns
            .iter()
            .map(|c| format!("{} {}", c.name, CQL_TYPE))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `foo, bar, ...` over the primary key columns
    pub fn primary_key(&self) -> String {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `foo,bar,...` for INSERT and SELECT column lists
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `?,?,?,?` bind markers for INSERT
    pub fn bind_markers(&self) -> String {
        vec!["?"; self.columns.len()].join(",")
    }
}

/// A table addressed by keyspace and name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub keyspace: String,
    pub table: String,
}

impl TableRef {
    pub fn new(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.keyspace, self.table)
    }
}

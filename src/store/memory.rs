//! In-process store with the same key semantics as the real one

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use async_trait::async_trait;

use crate::error::FixtureError;
use crate::model::{Dataset, Row, TableRef};

use super::Store;

type Keyspaces = BTreeMap<String, BTreeMap<String, BTreeSet<Row>>>;

/// Keyspaces and tables held in memory
///
/// A table is a set of rows: every column is part of the key, so inserting an
/// equal row again leaves one copy.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keyspaces: Mutex<Keyspaces>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Keyspaces> {
        self.keyspaces.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Remove one row, returning whether it was present
    pub fn delete_row(&self, table: &TableRef, row: &Row) -> Result<bool> {
        let mut keyspaces = self.lock();
        let rows = table_mut(&mut keyspaces, table)?;
        Ok(rows.remove(row))
    }

    /// Whether the keyspace exists
    pub fn has_keyspace(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Whether the table exists
    pub fn has_table(&self, table: &TableRef) -> bool {
        self.lock()
            .get(&table.keyspace)
            .is_some_and(|tables| tables.contains_key(&table.table))
    }
}

fn table_mut<'a>(
    keyspaces: &'a mut Keyspaces,
    table: &TableRef,
) -> Result<&'a mut BTreeSet<Row>, FixtureError> {
    keyspaces
        .get_mut(&table.keyspace)
        .ok_or_else(|| FixtureError::UnknownKeyspace(table.keyspace.clone()))?
        .get_mut(&table.table)
        .ok_or_else(|| FixtureError::UnknownTable(table.to_string()))
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_keyspace(&self, name: &str) -> Result<()> {
        let mut keyspaces = self.lock();
        if keyspaces.contains_key(name) {
            return Err(FixtureError::KeyspaceExists(name.to_string()).into());
        }
        keyspaces.insert(name.to_string(), BTreeMap::new());
        Ok(())
    }

    async fn create_table(&self, table: &TableRef) -> Result<()> {
        let mut keyspaces = self.lock();
        let tables = keyspaces
            .get_mut(&table.keyspace)
            .ok_or_else(|| FixtureError::UnknownKeyspace(table.keyspace.clone()))?;
        if tables.contains_key(&table.table) {
            return Err(FixtureError::TableExists(table.to_string()).into());
        }
        tables.insert(table.table.clone(), BTreeSet::new());
        Ok(())
    }

    async fn insert_rows(&self, table: &TableRef, rows: &[Row]) -> Result<usize> {
        let mut keyspaces = self.lock();
        let stored = table_mut(&mut keyspaces, table)?;
        stored.extend(rows.iter().copied());
        Ok(rows.len())
    }

    async fn select_all(&self, table: &TableRef) -> Result<Dataset> {
        let mut keyspaces = self.lock();
        let stored = table_mut(&mut keyspaces, table)?;
        Ok(Dataset::new(stored.iter().copied().collect()))
    }
}

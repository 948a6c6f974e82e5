//! Database gateway: the statements this tool issues and the stores that run them

mod cql;
mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{Dataset, Row, TableRef, TableSchema};

pub use cql::CqlStore;
pub use memory::MemoryStore;

/// A keyspace/table store that holds fixture rows
///
/// Callers issue one operation at a time and await it before the next.
#[async_trait]
pub trait Store: Send + Sync {
    /// Create a keyspace; fails if it already exists
    async fn create_keyspace(&self, name: &str) -> Result<()>;

    /// Create the fixture table; fails if it already exists
    async fn create_table(&self, table: &TableRef) -> Result<()>;

    /// Insert rows one statement at a time, returning how many were sent
    async fn insert_rows(&self, table: &TableRef, rows: &[Row]) -> Result<usize>;

    /// Read every row of the table
    async fn select_all(&self, table: &TableRef) -> Result<Dataset>;
}

/// `CREATE KEYSPACE` with SimpleStrategy replication
pub fn create_keyspace_cql(name: &str, replication_factor: u32) -> String {
    format!(
        "CREATE KEYSPACE {} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': {}}};",
        name, replication_factor
    )
}

/// `CREATE TABLE` with every column in the primary key
pub fn create_table_cql(table: &TableRef, schema: &TableSchema) -> String {
    format!(
        "CREATE TABLE {} ({}, PRIMARY KEY ({}));",
        table,
        schema.column_definitions(),
        schema.primary_key()
    )
}

/// Parameterized `INSERT` for one row
pub fn insert_cql(table: &TableRef, schema: &TableSchema) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table,
        schema.column_list(),
        schema.bind_markers()
    )
}

/// Unbounded `SELECT` in schema column order
pub fn select_cql(table: &TableRef, schema: &TableSchema) -> String {
    format!("SELECT {} FROM {};", schema.column_list(), table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_keyspace_cql() {
        assert_eq!(
            create_keyspace_cql("ks1", 1),
            "CREATE KEYSPACE ks1 WITH replication = {'class': 'SimpleStrategy', 'replication_factor': 1};"
        );
    }

    #[test]
    fn test_table_statements() {
        let table = TableRef::new("ks1", "t1");
        let schema = TableSchema::fixed();
        assert_eq!(
            create_table_cql(&table, &schema),
            "CREATE TABLE ks1.t1 (foo int, bar int, baz int, quux int, PRIMARY KEY (foo, bar, baz, quux));"
        );
        assert_eq!(
            insert_cql(&table, &schema),
            "INSERT INTO ks1.t1 (foo,bar,baz,quux) VALUES (?,?,?,?);"
        );
        assert_eq!(select_cql(&table, &schema), "SELECT foo,bar,baz,quux FROM ks1.t1;");
    }
}

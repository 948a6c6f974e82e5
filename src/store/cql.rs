//! Store backed by a Cassandra/ScyllaDB cluster

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;

use crate::config::Config;
use crate::model::{Dataset, Row, TableRef, TableSchema};

use super::{create_keyspace_cql, create_table_cql, insert_cql, select_cql, Store};

/// One driver session, opened per invocation and dropped at exit
pub struct CqlStore {
    session: Session,
    schema: TableSchema,
    replication_factor: u32,
}

impl CqlStore {
    /// Connect to the configured contact points
    pub async fn connect(config: &Config) -> Result<Self> {
        let hosts = config.hosts.join(",");
        tracing::info!(%hosts, "connecting");

        let mut builder = SessionBuilder::new().known_nodes(&config.hosts);
        if let (Some(user), Some(password)) = (&config.username, &config.password) {
            builder = builder.user(user, password);
        }

        let session = builder
            .build()
            .await
            .with_context(|| format!("Failed to connect to {}", hosts))?;

        Ok(Self {
            session,
            schema: TableSchema::fixed(),
            replication_factor: config.replication_factor,
        })
    }

    async fn execute_ddl(&self, statement: String) -> Result<()> {
        tracing::info!("{}", statement);
        self.session
            .query_unpaged(statement.as_str(), ())
            .await
            .with_context(|| format!("Statement failed: {}", statement))?;
        Ok(())
    }
}

#[async_trait]
impl Store for CqlStore {
    async fn create_keyspace(&self, name: &str) -> Result<()> {
        self.execute_ddl(create_keyspace_cql(name, self.replication_factor))
            .await
    }

    async fn create_table(&self, table: &TableRef) -> Result<()> {
        self.execute_ddl(create_table_cql(table, &self.schema)).await
    }

    async fn insert_rows(&self, table: &TableRef, rows: &[Row]) -> Result<usize> {
        let statement = insert_cql(table, &self.schema);
        tracing::debug!("preparing {}", statement);
        let prepared = self
            .session
            .prepare(statement.as_str())
            .await
            .with_context(|| format!("Failed to prepare: {}", statement))?;

        for (i, row) in rows.iter().enumerate() {
            self.session
                .execute_unpaged(&prepared, row.as_tuple())
                .await
                .with_context(|| {
                    format!("Insert of row {} failed; {} rows were already written", row, i)
                })?;
        }

        Ok(rows.len())
    }

    async fn select_all(&self, table: &TableRef) -> Result<Dataset> {
        let statement = select_cql(table, &self.schema);
        tracing::debug!("{}", statement);

        let mut stream = self
            .session
            .query_iter(statement.as_str(), ())
            .await
            .with_context(|| format!("Query failed: {}", statement))?
            .rows_stream::<(i32, i32, i32, i32)>()
            .context("Unexpected column types in result set")?;

        let mut rows = Vec::new();
        while let Some(row) = stream
            .try_next()
            .await
            .with_context(|| format!("Failed to read rows from {}", table))?
        {
            rows.push(Row::from(row));
        }

        Ok(Dataset::new(rows))
    }
}

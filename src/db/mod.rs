//! Database abstraction layer for db-chat.
//!
//! Provides a trait-based interface for database operations so the agent
//! toolkit and the UI can run against the real MySQL backend or an
//! in-memory mock interchangeably.

mod mock;
mod mysql;
mod schema;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use mysql::MySqlClient;
pub use schema::{SchemaMap, TableSchema};
pub use types::{QueryResult, Row, Value};

use crate::config::MysqlConfig;
use crate::error::Result;
use async_trait::async_trait;
use tracing::warn;

/// Trait defining the interface for database clients.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Introspects the database, returning the table-to-columns map.
    async fn fetch_schema_map(&self) -> Result<SchemaMap>;

    /// Executes a SQL query and returns the results.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}

/// Opens a connection to the configured MySQL database.
pub async fn connect(config: &MysqlConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = MySqlClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Fetches the schema map over a fresh connection, closing it afterwards.
///
/// Connection or query failures are logged and collapsed into an empty
/// map; the caller treats an empty map as "no schema available".
pub async fn fetch_schema(config: &MysqlConfig) -> SchemaMap {
    let client = match connect(config).await {
        Ok(client) => client,
        Err(e) => {
            warn!("Database connection failed: {e}");
            return SchemaMap::new();
        }
    };

    let schema = match client.fetch_schema_map().await {
        Ok(schema) => schema,
        Err(e) => {
            warn!("Schema introspection failed: {e}");
            SchemaMap::new()
        }
    };

    if let Err(e) = client.close().await {
        warn!("Error closing database connection: {e}");
    }

    schema
}

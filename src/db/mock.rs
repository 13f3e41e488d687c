//! Mock database clients for testing.
//!
//! `MockDatabaseClient` answers from an in-memory schema;
//! `FailingDatabaseClient` fails every call, for unreachable-database
//! scenarios.

use super::{DatabaseClient, QueryResult, SchemaMap, TableSchema, Value};
use crate::error::{ChatError, Result};
use async_trait::async_trait;

/// A mock database client that returns predefined results.
#[derive(Debug, Clone, Default)]
pub struct MockDatabaseClient {
    schema: SchemaMap,
}

impl MockDatabaseClient {
    /// Creates a new mock database client with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new mock database client with the given schema.
    pub fn with_schema(schema: SchemaMap) -> Self {
        Self { schema }
    }

    /// Creates a mock with a small sample schema (users, orders).
    pub fn sample() -> Self {
        Self::with_schema(SchemaMap::from_tables(vec![
            TableSchema::new(
                "users",
                vec!["id".into(), "email".into(), "name".into()],
            ),
            TableSchema::new(
                "orders",
                vec!["id".into(), "user_id".into(), "total".into()],
            ),
        ]))
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn fetch_schema_map(&self) -> Result<SchemaMap> {
        Ok(self.schema.clone())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        if sql.trim_start().to_uppercase().starts_with("SELECT") {
            Ok(QueryResult::with_data(
                vec!["result".to_string()],
                vec![vec![Value::String(format!("Mock result for: {sql}"))]],
            ))
        } else {
            Ok(QueryResult::default())
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A database client whose every operation fails with a connection error.
#[derive(Debug, Clone, Default)]
pub struct FailingDatabaseClient;

impl FailingDatabaseClient {
    /// Creates a new failing client.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn fetch_schema_map(&self) -> Result<SchemaMap> {
        Err(ChatError::connection("mock database is unreachable"))
    }

    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(ChatError::connection("mock database is unreachable"))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_schema() {
        let client = MockDatabaseClient::sample();
        let schema = client.fetch_schema_map().await.unwrap();

        assert_eq!(schema.table_names(), vec!["users", "orders"]);
        assert_eq!(schema.columns("users").unwrap(), &["id", "email", "name"]);
    }

    #[tokio::test]
    async fn test_mock_select() {
        let client = MockDatabaseClient::sample();
        let result = client.execute_query("SELECT 1").await.unwrap();
        assert_eq!(result.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = FailingDatabaseClient::new();
        assert!(client.fetch_schema_map().await.is_err());
        assert!(client.execute_query("SELECT 1").await.is_err());
    }
}

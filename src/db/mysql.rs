//! MySQL database client implementation.
//!
//! Implements the `DatabaseClient` trait using sqlx. Schema introspection
//! uses a single `information_schema` query instead of the
//! `SHOW TABLES` / `SHOW COLUMNS` round trip per table.

use crate::config::MysqlConfig;
use crate::db::{DatabaseClient, QueryResult, Row, SchemaMap, Value};
use crate::error::{ChatError, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo};
use std::time::Duration;
use tracing::{debug, warn};

/// Query timeout in seconds.
const QUERY_TIMEOUT_SECS: u64 = 30;

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum rows to return from a query (tool output goes to the model).
const MAX_ROWS: usize = 100;

/// MySQL database client backed by a single-connection pool.
#[derive(Debug)]
pub struct MySqlClient {
    pool: MySqlPool,
    database: String,
}

impl MySqlClient {
    /// Opens a connection to the configured database.
    pub async fn connect(config: &MysqlConfig) -> Result<Self> {
        let conn_str = config.to_connection_string();
        debug!("Connecting to {}:{}", config.host, config.port);

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .connect(&conn_str)
            .await
            .map_err(|e| map_connection_error(e, config))?;

        debug!("Connected to database '{}'", config.database);
        Ok(Self {
            pool,
            database: config.database.clone(),
        })
    }

    /// Creates a client from an existing pool, for testing.
    #[allow(dead_code)]
    pub fn from_pool(pool: MySqlPool, database: impl Into<String>) -> Self {
        Self {
            pool,
            database: database.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for MySqlClient {
    async fn fetch_schema_map(&self) -> Result<SchemaMap> {
        // One round trip; ordinal_position preserves native column order.
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT table_name, column_name
            FROM information_schema.columns
            WHERE table_schema = ?
            ORDER BY table_name, ordinal_position
            "#,
        )
        .bind(&self.database)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ChatError::query(format!("Failed to introspect schema: {e}")))?;

        let mut schema = SchemaMap::new();
        for (table, column) in rows {
            schema.push_column(&table, column);
        }

        debug!("Introspected {} tables", schema.len());
        Ok(schema)
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let result = tokio::time::timeout(
            Duration::from_secs(QUERY_TIMEOUT_SECS),
            sqlx::query(sql).fetch_all(&self.pool),
        )
        .await
        .map_err(|_| {
            ChatError::query(format!("Query timed out after {QUERY_TIMEOUT_SECS} seconds"))
        })?
        .map_err(|e| ChatError::query(format_query_error(e)))?;

        let columns: Vec<String> = result
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();

        let total_rows = result.len();
        let was_truncated = total_rows > MAX_ROWS;
        if was_truncated {
            warn!("Query returned {total_rows} rows, truncating to {MAX_ROWS}");
        }

        let rows: Vec<Row> = result.iter().take(MAX_ROWS).map(convert_row).collect();

        Ok(QueryResult {
            columns,
            rows,
            was_truncated,
        })
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Converts a sqlx MySqlRow to our Row type.
fn convert_row(row: &MySqlRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a MySqlRow to our Value type.
fn convert_value(row: &MySqlRow, index: usize, type_name: &str) -> Value {
    match type_name.to_uppercase().as_str() {
        "BOOLEAN" | "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => row
            .try_get::<Option<u64>, _>(index)
            .ok()
            .flatten()
            .map(|v| {
                i64::try_from(v)
                    .map(Value::Int)
                    .unwrap_or_else(|_| Value::String(v.to_string()))
            })
            .unwrap_or(Value::Null),

        "FLOAT" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Float(v as f64))
            .unwrap_or(Value::Null),

        "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "VARBINARY" | "BINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        // DECIMAL, dates, and everything else render as text
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &MysqlConfig) -> ChatError {
    let host = &config.host;
    let port = config.port;
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") || error_str.contains("could not connect") {
        ChatError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("access denied") || error_str.contains("authentication") {
        ChatError::connection(format!(
            "Authentication failed for user '{}'. Check your credentials.",
            config.user
        ))
    } else if error_str.contains("unknown database") {
        ChatError::connection(format!("Database '{}' does not exist.", config.database))
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        ChatError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be unreachable."
        ))
    } else {
        ChatError::connection(error.to_string())
    }
}

/// Formats a query error, surfacing the server message when available.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests requiring a live MySQL server read DATABASE_URL and skip when
    // it is not set.

    async fn get_test_client() -> Option<MySqlClient> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let config = MysqlConfig::from_connection_string(&url).ok()?;
        MySqlClient::connect(&config).await.ok()
    }

    #[tokio::test]
    async fn test_fetch_schema_map() {
        let Some(client) = get_test_client().await else {
            eprintln!("Skipping test: DATABASE_URL not set");
            return;
        };

        let schema = client.fetch_schema_map().await.unwrap();
        assert!(!schema.is_empty(), "Expected at least one table");

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_select_query() {
        let Some(client) = get_test_client().await else {
            eprintln!("Skipping test: DATABASE_URL not set");
            return;
        };

        let result = client
            .execute_query("SELECT 1 AS num, 'hello' AS greeting")
            .await
            .unwrap();

        assert_eq!(result.columns, vec!["num", "greeting"]);
        assert_eq!(result.rows.len(), 1);

        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_bad_host_is_connection_error() {
        let config = MysqlConfig {
            host: "nonexistent.invalid.host".to_string(),
            port: 3306,
            user: "testuser".to_string(),
            password: "testpass".to_string(),
            database: "testdb".to_string(),
        };

        let result = MySqlClient::connect(&config).await;
        assert!(matches!(result, Err(ChatError::Connection(_))));
    }
}

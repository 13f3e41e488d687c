//! SQL toolkit exposed to the LLM.
//!
//! Three tools: list tables, describe a table, execute a read-only query.
//! Every result is a JSON string; tool-level failures are reported as
//! `{"error": ...}` payloads so the model can correct itself instead of
//! aborting the conversation.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::db::DatabaseClient;
use crate::error::Result;
use crate::llm::ToolDefinition;
use crate::safety;

pub const TOOL_LIST_TABLES: &str = "list_tables";
pub const TOOL_DESCRIBE_TABLE: &str = "describe_table";
pub const TOOL_EXECUTE_QUERY: &str = "execute_query";

#[derive(Debug, Deserialize)]
struct DescribeTableArgs {
    table: String,
}

#[derive(Debug, Deserialize)]
struct ExecuteQueryArgs {
    sql: String,
}

/// The set of database tools offered to the model.
pub struct SqlToolkit<'a> {
    db: &'a dyn DatabaseClient,
}

impl<'a> SqlToolkit<'a> {
    /// Creates a toolkit backed by the given database client.
    pub fn new(db: &'a dyn DatabaseClient) -> Self {
        Self { db }
    }

    /// Returns the tool definitions to advertise to the model.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: TOOL_LIST_TABLES.to_string(),
                description: "List the tables in the database.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            ToolDefinition {
                name: TOOL_DESCRIBE_TABLE.to_string(),
                description: "List the columns of a table.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "table": {
                            "type": "string",
                            "description": "Name of the table to describe"
                        }
                    },
                    "required": ["table"]
                }),
            },
            ToolDefinition {
                name: TOOL_EXECUTE_QUERY.to_string(),
                description: "Execute a read-only SQL query (SELECT, SHOW, EXPLAIN) \
                              against the database and return the rows as JSON."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "sql": {
                            "type": "string",
                            "description": "The SQL query to execute"
                        }
                    },
                    "required": ["sql"]
                }),
            },
        ]
    }

    /// Executes the named tool and returns its result as a JSON string.
    ///
    /// Unknown tools, bad arguments, refused SQL and query failures all
    /// come back as `{"error": ...}` strings rather than `Err`, so the
    /// model gets a chance to recover.
    pub async fn execute(&self, name: &str, arguments: &str) -> Result<String> {
        debug!(tool = name, "Executing tool call");

        let result = match name {
            TOOL_LIST_TABLES => self.list_tables().await,
            TOOL_DESCRIBE_TABLE => match serde_json::from_str::<DescribeTableArgs>(arguments) {
                Ok(args) => self.describe_table(&args.table).await,
                Err(e) => error_payload(&format!("invalid arguments: {e}")),
            },
            TOOL_EXECUTE_QUERY => match serde_json::from_str::<ExecuteQueryArgs>(arguments) {
                Ok(args) => self.execute_query(&args.sql).await,
                Err(e) => error_payload(&format!("invalid arguments: {e}")),
            },
            other => error_payload(&format!("unknown tool: {other}")),
        };

        Ok(result)
    }

    async fn list_tables(&self) -> String {
        match self.db.fetch_schema_map().await {
            Ok(schema) => json!({ "tables": schema.table_names() }).to_string(),
            Err(e) => error_payload(&e.to_string()),
        }
    }

    async fn describe_table(&self, table: &str) -> String {
        match self.db.fetch_schema_map().await {
            Ok(schema) => match schema.columns(table) {
                Some(columns) => json!({ "table": table, "columns": columns }).to_string(),
                None => error_payload(&format!("table not found: {table}")),
            },
            Err(e) => error_payload(&e.to_string()),
        }
    }

    async fn execute_query(&self, sql: &str) -> String {
        let verdict = safety::classify_sql(sql);
        if !verdict.is_allowed() {
            warn!(sql, %verdict, "Refused SQL from the model");
            return error_payload(&verdict.to_string());
        }

        match self.db.execute_query(sql).await {
            Ok(result) => result.to_tool_json(),
            Err(e) => error_payload(&e.to_string()),
        }
    }
}

fn error_payload(message: &str) -> String {
    json!({ "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockDatabaseClient;

    #[test]
    fn test_definitions() {
        let db = MockDatabaseClient::sample();
        let toolkit = SqlToolkit::new(&db);
        let defs = toolkit.definitions();

        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![TOOL_LIST_TABLES, TOOL_DESCRIBE_TABLE, TOOL_EXECUTE_QUERY]
        );
    }

    #[tokio::test]
    async fn test_list_tables() {
        let db = MockDatabaseClient::sample();
        let toolkit = SqlToolkit::new(&db);

        let result = toolkit.execute(TOOL_LIST_TABLES, "{}").await.unwrap();
        assert!(result.contains("users"));
        assert!(result.contains("orders"));
    }

    #[tokio::test]
    async fn test_describe_table() {
        let db = MockDatabaseClient::sample();
        let toolkit = SqlToolkit::new(&db);

        let result = toolkit
            .execute(TOOL_DESCRIBE_TABLE, r#"{"table":"users"}"#)
            .await
            .unwrap();
        assert!(result.contains("email"));
    }

    #[tokio::test]
    async fn test_describe_missing_table() {
        let db = MockDatabaseClient::sample();
        let toolkit = SqlToolkit::new(&db);

        let result = toolkit
            .execute(TOOL_DESCRIBE_TABLE, r#"{"table":"missing"}"#)
            .await
            .unwrap();
        assert!(result.contains("error"));
        assert!(result.contains("table not found"));
    }

    #[tokio::test]
    async fn test_execute_query_select() {
        let db = MockDatabaseClient::sample();
        let toolkit = SqlToolkit::new(&db);

        let result = toolkit
            .execute(TOOL_EXECUTE_QUERY, r#"{"sql":"SELECT COUNT(*) FROM users"}"#)
            .await
            .unwrap();
        assert!(!result.contains("error"));
    }

    #[tokio::test]
    async fn test_execute_query_refuses_write() {
        let db = MockDatabaseClient::sample();
        let toolkit = SqlToolkit::new(&db);

        let result = toolkit
            .execute(TOOL_EXECUTE_QUERY, r#"{"sql":"DROP TABLE users"}"#)
            .await
            .unwrap();
        assert!(result.contains("error"));
        assert!(result.contains("DROP"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let db = MockDatabaseClient::sample();
        let toolkit = SqlToolkit::new(&db);

        let result = toolkit.execute("nonsense", "{}").await.unwrap();
        assert!(result.contains("unknown tool"));
    }

    #[tokio::test]
    async fn test_bad_arguments() {
        let db = MockDatabaseClient::sample();
        let toolkit = SqlToolkit::new(&db);

        let result = toolkit
            .execute(TOOL_EXECUTE_QUERY, "not json")
            .await
            .unwrap();
        assert!(result.contains("invalid arguments"));
    }
}

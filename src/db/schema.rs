//! Schema map types for db-chat.
//!
//! The schema map is a table-name-to-column-names mapping, preserving the
//! database's native column ordering. It is rebuilt in full on every fetch
//! and used both for the sidebar display and the agent's system prompt.

use serde::{Deserialize, Serialize};

/// The columns of a single table, in ordinal order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name.
    pub name: String,

    /// Column names, in the database's native order.
    pub columns: Vec<String>,
}

impl TableSchema {
    /// Creates a table schema with the given name and columns.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// Mapping from table name to ordered column names.
///
/// Tables keep the order they were discovered in; an empty map means
/// "no schema available", which the UI renders as a warning rather than
/// an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaMap {
    tables: Vec<TableSchema>,
}

impl SchemaMap {
    /// Creates a new empty schema map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schema map from a list of tables.
    pub fn from_tables(tables: Vec<TableSchema>) -> Self {
        Self { tables }
    }

    /// Appends a column to the named table, creating the table if needed.
    ///
    /// Rows arriving ordered by `(table_name, ordinal_position)` rebuild
    /// the map with native ordering intact.
    pub fn push_column(&mut self, table: &str, column: impl Into<String>) {
        match self.tables.last_mut() {
            Some(last) if last.name == table => last.columns.push(column.into()),
            _ => self
                .tables
                .push(TableSchema::new(table, vec![column.into()])),
        }
    }

    /// Returns all tables in discovery order.
    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    /// Returns the columns of the named table, if present.
    pub fn columns(&self, table: &str) -> Option<&[String]> {
        self.tables
            .iter()
            .find(|t| t.name == table)
            .map(|t| t.columns.as_slice())
    }

    /// Returns the table names in discovery order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Returns true if no tables were discovered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Formats the schema for inclusion in the LLM system prompt.
    pub fn format_for_llm(&self) -> String {
        let tables_text = self
            .tables
            .iter()
            .map(|table| {
                format!(
                    "Table: {}\n{}",
                    table.name,
                    table
                        .columns
                        .iter()
                        .map(|c| format!("  - {c}\n"))
                        .collect::<String>()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!("Database Schema:\n\n{tables_text}")
    }
}

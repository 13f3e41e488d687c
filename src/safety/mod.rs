//! Read-only gate for SQL issued by the agent.
//!
//! The model's `execute_query` tool calls are parsed with sqlparser and
//! only read-only statements are allowed through. Anything mutating,
//! destructive, or unparseable is refused at the tool boundary.

use sqlparser::ast::Statement;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use std::fmt;

/// Verdict for a SQL string submitted by the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Read-only; safe to execute.
    ReadOnly,
    /// Writes or alters data/schema; refused.
    Refused(String),
}

impl Verdict {
    /// Returns true if the statement may be executed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::ReadOnly)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "read-only"),
            Self::Refused(reason) => write!(f, "refused: {reason}"),
        }
    }
}

/// Classifies a SQL string, allowing only read-only statements.
///
/// Unparseable SQL is refused (conservative default), as are multi-statement
/// inputs containing anything non-read-only.
pub fn classify_sql(sql: &str) -> Verdict {
    let dialect = MySqlDialect {};
    let statements = match Parser::parse_sql(&dialect, sql) {
        Ok(statements) => statements,
        Err(e) => return Verdict::Refused(format!("could not parse SQL: {e}")),
    };

    if statements.is_empty() {
        return Verdict::Refused("empty SQL statement".to_string());
    }

    for statement in &statements {
        if let Some(reason) = refusal_reason(statement) {
            return Verdict::Refused(reason);
        }
    }

    Verdict::ReadOnly
}

/// Returns why a statement is not read-only, or None if it is.
fn refusal_reason(statement: &Statement) -> Option<String> {
    match statement {
        // MySQL has no data-modifying CTEs, so a Query is a read.
        Statement::Query(_) => None,

        Statement::Explain { analyze, .. } => {
            // EXPLAIN ANALYZE executes the inner statement.
            if *analyze {
                Some("EXPLAIN ANALYZE executes the statement".to_string())
            } else {
                None
            }
        }

        // DESCRIBE <table>
        Statement::ExplainTable { .. } => None,

        Statement::ShowVariable { .. }
        | Statement::ShowTables { .. }
        | Statement::ShowColumns { .. }
        | Statement::ShowCreate { .. }
        | Statement::ShowFunctions { .. }
        | Statement::ShowStatus { .. }
        | Statement::ShowCollation { .. } => None,

        other => Some(format!(
            "only read-only statements are allowed, got: {}",
            statement_keyword(other)
        )),
    }
}

/// Returns the leading keyword of a statement for error messages.
fn statement_keyword(statement: &Statement) -> &'static str {
    match statement {
        Statement::Insert(_) => "INSERT",
        Statement::Update { .. } => "UPDATE",
        Statement::Delete(_) => "DELETE",
        Statement::Drop { .. } => "DROP",
        Statement::Truncate { .. } => "TRUNCATE",
        Statement::AlterTable { .. } | Statement::AlterIndex { .. } | Statement::AlterView { .. } => {
            "ALTER"
        }
        Statement::CreateTable { .. }
        | Statement::CreateIndex { .. }
        | Statement::CreateView { .. }
        | Statement::CreateDatabase { .. } => "CREATE",
        Statement::Grant { .. } => "GRANT",
        Statement::Revoke { .. } => "REVOKE",
        _ => "a non-read statement",
    }
}

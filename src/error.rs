//! Error types for db-chat.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for db-chat operations.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Configuration errors (missing environment variables, bad URLs, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors (syntax errors, unknown tables, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// LLM API errors (auth, rate limits, malformed responses, etc.)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Agent failures collapsed at the bridge boundary.
    #[error("Query processing failed: {0}")]
    Agent(String),

    /// The agent did not finish within the configured deadline.
    #[error("Timed out after {0} seconds waiting for an answer")]
    Timeout(u64),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates an agent error with the given message.
    pub fn agent(msg: impl Into<String>) -> Self {
        Self::Agent(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Llm(_) => "LLM Error",
            Self::Agent(_) => "Agent Error",
            Self::Timeout(_) => "Timeout",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using ChatError.
pub type Result<T> = std::result::Result<T, ChatError>;

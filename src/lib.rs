//! db-chat - A chat-style natural-language front-end for MySQL databases.
//!
//! An LLM turns questions into read-only SQL via a small toolkit, runs
//! them against the configured database, and answers in plain language.
//! Ships a ratatui TUI and a one-shot headless mode.

pub mod agent;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod headless;
pub mod llm;
pub mod logging;
pub mod safety;
pub mod tui;

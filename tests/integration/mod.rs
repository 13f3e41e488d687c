//! Integration tests for db-chat.

pub mod agent_test;
pub mod app_test;
pub mod config_test;
pub mod schema_test;

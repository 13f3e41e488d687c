//! Configuration loading integration tests.
//!
//! These mutate process environment variables, so they share a lock to
//! keep the parallel test runner from interleaving them.

use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use db_chat::config::{Config, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use db_chat::error::ChatError;
use pretty_assertions::assert_eq;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const ALL_KEYS: &[&str] = &[
    "MYSQL_HOST",
    "MYSQL_PORT",
    "MYSQL_USER",
    "MYSQL_PASSWORD",
    "MYSQL_DATABASE",
    "GROQ_API_KEY_SQL",
    "GROQ_MODEL",
];

fn clean_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for key in ALL_KEYS {
        std::env::remove_var(key);
    }
    guard
}

fn set_required_vars() {
    std::env::set_var("MYSQL_HOST", "localhost");
    std::env::set_var("MYSQL_USER", "app");
    std::env::set_var("MYSQL_PASSWORD", "secret");
    std::env::set_var("MYSQL_DATABASE", "shop");
    std::env::set_var("GROQ_API_KEY_SQL", "gsk-test");
}

#[test]
fn test_from_env_with_all_required_vars() {
    let _guard = clean_env();
    set_required_vars();

    let config = Config::from_env().unwrap();
    assert_eq!(config.mysql.host, "localhost");
    assert_eq!(config.mysql.port, 3306);
    assert_eq!(config.mysql.database, "shop");
    assert_eq!(config.groq.api_key, "gsk-test");
    assert_eq!(config.groq.model, DEFAULT_MODEL);
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn test_from_env_reports_all_missing_keys_at_once() {
    let _guard = clean_env();
    std::env::set_var("MYSQL_HOST", "localhost");

    let error = Config::from_env().unwrap_err();
    assert!(matches!(error, ChatError::Config(_)));

    let message = error.to_string();
    assert!(message.contains("MYSQL_USER"));
    assert!(message.contains("MYSQL_PASSWORD"));
    assert!(message.contains("MYSQL_DATABASE"));
    assert!(message.contains("GROQ_API_KEY_SQL"));
    assert!(!message.contains("MYSQL_HOST"));
}

#[test]
fn test_from_env_treats_empty_values_as_missing() {
    let _guard = clean_env();
    set_required_vars();
    std::env::set_var("MYSQL_PASSWORD", "");

    let error = Config::from_env().unwrap_err();
    assert!(error.to_string().contains("MYSQL_PASSWORD"));
}

#[test]
fn test_from_env_optional_overrides() {
    let _guard = clean_env();
    set_required_vars();
    std::env::set_var("MYSQL_PORT", "3307");
    std::env::set_var("GROQ_MODEL", "llama-3.3-70b-versatile");

    let config = Config::from_env().unwrap();
    assert_eq!(config.mysql.port, 3307);
    assert_eq!(config.groq.model, "llama-3.3-70b-versatile");
}

#[test]
fn test_from_env_rejects_bad_port() {
    let _guard = clean_env();
    set_required_vars();
    std::env::set_var("MYSQL_PORT", "not-a-port");

    let error = Config::from_env().unwrap_err();
    assert!(error.to_string().contains("MYSQL_PORT"));
}

#[test]
fn test_env_file_seeds_environment() {
    let _guard = clean_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "MYSQL_HOST=db.example.com").unwrap();
    writeln!(file, "MYSQL_USER=app").unwrap();
    writeln!(file, "MYSQL_PASSWORD=secret").unwrap();
    writeln!(file, "MYSQL_DATABASE=shop").unwrap();
    writeln!(file, "GROQ_API_KEY_SQL=gsk-from-file").unwrap();

    dotenvy::from_path(file.path()).unwrap();

    let config = Config::from_env().unwrap();
    assert_eq!(config.mysql.host, "db.example.com");
    assert_eq!(config.groq.api_key, "gsk-from-file");
}

//! Logging configuration for db-chat.
//!
//! Writes to a file in TUI mode (to avoid corrupting the terminal display)
//! and to stderr in headless mode.

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initializes logging for TUI mode.
///
/// Logs are written to a file to avoid corrupting the terminal display.
/// Location: `~/.local/state/dbchat/dbchat.log` on Linux (XDG state
/// directory), or the platform-appropriate directory elsewhere.
pub fn init_file_logging() {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            // Fall back to no logging rather than corrupting the TUI
            return;
        }
    }

    // Truncate on each run to avoid unbounded growth
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

/// Initializes logging for headless mode.
///
/// Logs are written to stderr so they never mix with the answer on stdout.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the path for the log file.
pub fn get_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("dbchat").join("dbchat.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("dbchat").join("dbchat.log");
    }

    std::env::temp_dir().join("dbchat.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_is_absolute() {
        let path = get_log_path();
        assert!(path.is_absolute());
    }

    #[test]
    fn test_log_path_ends_with_dbchat_log() {
        let path = get_log_path();
        assert!(path.ends_with("dbchat.log"));
    }
}

//! Logging - File-backed tracing while the TUI owns the terminal
//!
//! Log path fallback chain:
//! 1. $SENTINELCTL_LOG_FILE (explicit override)
//! 2. $XDG_STATE_HOME/sentinel/ctl.log
//! 3. ~/.local/state/sentinel/ctl.log
//!
//! Never defaults to /var/log for non-root users. When no path resolves or
//! the file cannot be opened, logs go to stderr instead (visible after the
//! alternate screen is torn down).

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Env var controlling the log filter (standard EnvFilter syntax)
pub const LOG_FILTER_ENV: &str = "SENTINEL_LOG";

/// Env var overriding the log file path
pub const LOG_FILE_ENV: &str = "SENTINELCTL_LOG_FILE";

/// Initialize the global tracing subscriber
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    match open_log_file() {
        Some(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Discover the log file path with the fallback chain
pub fn discover_log_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg_state).join("sentinel").join("ctl.log"));
    }

    if let Ok(home) = std::env::var("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("sentinel")
                .join("ctl.log"),
        );
    }

    None
}

fn open_log_file() -> Option<File> {
    let path = discover_log_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()
}

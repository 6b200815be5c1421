//! Tracing subscriber setup.
//!
//! The terminal UI owns the screen, so interactive sessions log to
//! `<data dir>/logs/ingame.log`. One-shot commands log to stderr.
//! `RUST_LOG` overrides the default `info` filter.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub const LOG_FILE_NAME: &str = "ingame.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

/// Keeps the background log writer alive. Buffered lines are flushed when
/// this is dropped, so hold it until the program exits.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn log_file_path() -> Result<PathBuf> {
    Ok(Config::log_dir()?.join(LOG_FILE_NAME))
}

/// Subscriber writing to `file` from a background thread.
fn file_subscriber(
    file: fs::File,
    filter: EnvFilter,
) -> (impl tracing::Subscriber + Send + Sync, WorkerGuard) {
    let (writer, guard) = tracing_appender::non_blocking(file);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish();
    (subscriber, guard)
}

/// Install the global subscriber. Falls back to stderr when the log file
/// cannot be opened.
pub fn init(target: LogTarget) -> LogGuard {
    if target == LogTarget::File {
        match open_log_file() {
            Ok((path, file)) => {
                let (subscriber, guard) = file_subscriber(file, env_filter("info"));
                if tracing::subscriber::set_global_default(subscriber).is_ok() {
                    tracing::info!(path = %path.display(), "logging initialized");
                }
                return LogGuard {
                    _worker: Some(guard),
                };
            }
            Err(err) => {
                init_stderr("warn");
                tracing::warn!(error = %err, "failed to open log file; using stderr");
                return LogGuard { _worker: None };
            }
        }
    }
    init_stderr("warn");
    LogGuard { _worker: None }
}

fn init_stderr(default: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_log_file() -> Result<(PathBuf, fs::File)> {
    let path = log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    Ok((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        if let Ok(path) = log_file_path() {
            assert!(path.ends_with(LOG_FILE_NAME));
        }
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let _first = init(LogTarget::Stderr);
        let _second = init(LogTarget::Stderr);
    }

    #[test]
    fn test_file_subscriber_flushes_on_guard_drop() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();

        let (subscriber, guard) = file_subscriber(file, EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(platform = "pc", "catalog fetched");
            tracing::debug!("below the default filter");
        });
        drop(guard);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("catalog fetched"));
        assert!(written.contains("platform=\"pc\""));
        assert!(!written.contains("below the default filter"));
    }
}

//! Structured JSONL logging plus human-readable stderr output.
//!
//! - **JSONL to file** (~/.quickpick/logs/quick-pick.jsonl) - one JSON object per line
//! - **Compact to stderr** - for whoever is running the tool
//!
//! # Usage
//!
//! ```rust,ignore
//! use quick_pick::logging;
//!
//! // Keep the guard alive for the duration of the program
//! let _guard = logging::init();
//!
//! tracing::info!(event_type = "search", results = 12, "Search finished");
//! ```
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the binary (or the embedding host).

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_NAME: &str = "quick-pick.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping it flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize dual-output logging.
///
/// If the log file can't be opened, logging continues on stderr only.
/// Calling this twice is harmless; the second subscriber is not installed.
pub fn init() -> LoggingGuard {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            None
        }
    };

    let (json_layer, file_guard) = match file {
        Some(file) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Default to info, allow override via RUST_LOG
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(stderr_layer)
        .try_init();

    if installed.is_ok() {
        tracing::debug!(
            event_type = "app_lifecycle",
            action = "started",
            log_path = %log_path.display(),
            "Logging initialized"
        );
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Get the log directory path (~/.quickpick/logs/)
fn get_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".quickpick").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("quick-pick-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

/// Log a timing, as a warning when it exceeds `threshold_ms`
pub fn log_perf(operation: &str, duration_ms: u64, threshold_ms: u64) {
    let is_slow = duration_ms > threshold_ms;

    if is_slow {
        tracing::warn!(
            event_type = "performance",
            operation = operation,
            duration_ms = duration_ms,
            threshold_ms = threshold_ms,
            is_slow = true,
            "Slow operation: {} took {}ms (threshold: {}ms)", operation, duration_ms, threshold_ms
        );
    } else {
        tracing::debug!(
            event_type = "performance",
            operation = operation,
            duration_ms = duration_ms,
            threshold_ms = threshold_ms,
            is_slow = false,
            "Operation {} completed in {}ms", operation, duration_ms
        );
    }
}

/// Log the outcome of a user-facing search
pub fn log_search(context: &str, query: &str, results: usize, duration_ms: u64) {
    tracing::info!(
        event_type = "search",
        context = context,
        query_len = query.len(),
        results = results,
        duration_ms = duration_ms,
        "Search in '{}' returned {} results", context, results
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_is_jsonl_in_log_dir() {
        let path = log_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(LOG_FILE_NAME));
        assert_eq!(path.parent(), Some(get_log_dir().as_path()));
    }

    #[test]
    fn test_log_dir_is_under_quickpick() {
        let dir = get_log_dir();
        if dirs::home_dir().is_some() {
            assert!(dir.ends_with(".quickpick/logs"));
        }
    }

    #[test]
    fn test_helpers_without_subscriber() {
        log_perf("library_search", 40, 16);
        log_perf("library_search", 2, 16);
        log_search("graph", "add", 3, 2);
    }
}

//! Logging bootstrap and command logging helpers

use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use workdeck_domain::WorkdeckError;

/// Initialize the tracing subscriber for the dashboard process.
///
/// Filtering follows `RUST_LOG` when set and defaults to `info`
/// otherwise. Safe to call once at process start; later calls are
/// ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Log the outcome of a report command with structured fields.
///
/// The helper keeps the command wrappers concise and the log shape
/// uniform across both dashboards.
#[inline]
pub fn log_command_execution(command: &str, rows: usize, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, rows, duration_ms, "command_execution_success");
    } else {
        warn!(command, rows, duration_ms, "command_execution_failure");
    }
}

/// Convert a `WorkdeckError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &WorkdeckError) -> &'static str {
    match error {
        WorkdeckError::Config(_) => "config",
        WorkdeckError::Io(_) => "io",
        WorkdeckError::NotFound(_) => "not_found",
        WorkdeckError::InvalidInput(_) => "invalid_input",
        WorkdeckError::Internal(_) => "internal",
    }
}

//! Tracing setup for the binary
//!
//! The HTTP server and batch runs both log through `tracing`; this module wires
//! the subscriber once at startup.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::log_dir;

const LOG_FILE_PREFIX: &str = "go-mocker.log";

/// Install the global subscriber
///
/// Logs go to a daily-rolling JSON file under [`log_dir`], and to stderr as well
/// when `to_stderr` is set. The level defaults to `info` and follows `RUST_LOG`.
/// The returned guard flushes the file writer on drop.
pub fn init_logging(to_stderr: bool) -> WorkerGuard {
    let log_dir = log_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("go-mocker: can't create log directory {}: {}", log_dir.display(), e);
    }

    // go-mocker.log.<date>
    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}

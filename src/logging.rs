//! Logging infrastructure.
//!
//! The TUI owns the terminal, so log output goes to a file in the config
//! directory instead of stderr. Filtering follows the RUST_LOG environment
//! variable and defaults to `info`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Initializes the tracing subscriber with file logging.
///
/// Returns the appender guard, which must stay alive for the duration of
/// the process so buffered log lines are flushed on exit. If the log
/// directory cannot be created, logging is silently disabled; diagnostics
/// must never prevent the application from running.
pub fn init() -> Option<WorkerGuard> {
    let logs_dir = Config::config_dir().ok()?.join("logs");
    std::fs::create_dir_all(&logs_dir).ok()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(logs_dir, "keyatlas.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    Some(guard)
}

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// File name prefix of the rotating log files
pub const LOG_FILE_PREFIX: &str = "taskloop.log";

/// Builds the level filter; `RUST_LOG` wins over `log_level` when set
fn level_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::try_new(log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
        EnvFilter::new("info")
    })
}

/// Installs the global subscriber.
///
/// Console output goes to stderr so the task report on stdout stays readable.
/// With `log_dir`, events are also appended to daily rotated files there,
/// written from a background thread.
///
/// # Returns
///
/// The file writer's guard. Keep it alive until exit or buffered lines are lost.
///
/// # Example
///
/// ```no_run
/// let _guard = taskloop::utils::init_logging("debug", Some(std::path::Path::new("logs")));
/// ```
pub fn init_logging(log_level: &str, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry()
        .with(level_filter(log_level))
        .with(console_layer);

    match log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(writer);
            registry.with(file_layer).init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

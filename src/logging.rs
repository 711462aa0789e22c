use std::env;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_DIR_VAR, LOG_FILE_PREFIX};

/// Keeps the file writer alive. Dropping it flushes buffered records, so it
/// has to go before the process image is replaced.
#[derive(Debug, Default)]
#[must_use = "dropping the guard stops the log file writer"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Initializes logging with console output on stderr and, when `APP_LOG_DIR`
/// is set, a JSON file in that directory.
pub fn init_logging() -> LoggingGuard {
    let log_dir = env::var_os(LOG_DIR_VAR)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from);
    init_logging_with(log_dir.as_deref())
}

pub fn init_logging_with(log_dir: Option<&Path>) -> LoggingGuard {
    // Respect RUST_LOG if set; otherwise stay quiet so stderr carries only diagnostics
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Stdout belongs to the program we hand off to; container logs get no escapes
    let console_layer = fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let mut file_error = None;
    let (file_layer, file_guard) = match log_dir.map(file_writer) {
        Some(Ok((writer, guard))) => (Some(fmt::layer().json().with_writer(writer)), Some(guard)),
        Some(Err(e)) => {
            file_error = Some(e);
            (None, None)
        }
        None => (None, None),
    };

    // A subscriber may already be installed when called twice in one process
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    // Below the default filter: stderr is reserved for the one diagnostic line
    if let (Some(dir), Some(e)) = (log_dir, file_error) {
        debug!(dir = %dir.display(), error = %e, "File logging disabled");
    }

    LoggingGuard { _file: file_guard }
}

fn file_writer(dir: &Path) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)
        .map_err(std::io::Error::other)?;

    Ok(tracing_appender::non_blocking(appender))
}

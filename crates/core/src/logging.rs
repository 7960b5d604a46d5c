//! Log setup shared by every resfinder entry point.
//!
//! Logs go to daily files `resfinder[-<component>].<date>.log` under
//! `~/.resfinder/logs` (or `$RESFINDER_LOG_DIR`). Verbosity comes from
//! `$RESFINDER_LOG`, using `EnvFilter` directive syntax.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const DEFAULT_COMPONENT: &str = "resfinder";
pub const LOG_ENV: &str = "RESFINDER_LOG";
pub const LOG_DIR_ENV: &str = "RESFINDER_LOG_DIR";

const DEFAULT_DIRECTIVES: &str = "warn,resfinder_core=info,resfinder_cli=info";

pub fn log_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".resfinder/logs")
}

/// File name prefix for a component's log files.
pub fn log_file_prefix(component: &str) -> String {
    match component.trim() {
        "" | DEFAULT_COMPONENT => DEFAULT_COMPONENT.to_string(),
        other => format!("{DEFAULT_COMPONENT}-{other}"),
    }
}

fn env_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid {LOG_ENV}={directives:?}: {e}");
            EnvFilter::new(DEFAULT_DIRECTIVES)
        }),
        Err(_) => EnvFilter::new(DEFAULT_DIRECTIVES),
    }
}

/// Installs the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init_logging(component: Option<&str>, to_stderr: bool) -> WorkerGuard {
    let dir = log_dir();
    let _ = std::fs::create_dir_all(&dir);

    let prefix = log_file_prefix(component.unwrap_or(DEFAULT_COMPONENT));
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&prefix)
        .filename_suffix("log")
        .build(&dir)
        .unwrap_or_else(|_| tracing_appender::rolling::daily(&dir, &prefix));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .compact();
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}

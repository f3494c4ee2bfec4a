//! Logger setup for the platform side.
//!
//! Library code logs through the `log` facade. [`init_logger`] installs a `tracing` subscriber that receives those
//! records and writes them to stdout and, optionally, to a daily rolling file.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use parking_lot::Mutex;
use serde::Deserialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static::lazy_static! {
    static ref IS_LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);
    static ref WORKER_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(None);
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub default_filter: String,
    /// Folder for log files. No file is written when `None`.
    pub directory: Option<PathBuf>,
    /// File name prefix of the rolling log files.
    pub file_prefix: String,
    /// Write log records to stdout.
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            directory: None,
            file_prefix: "mapconv.log".to_string(),
            console: true,
        }
    }
}

/// Installs the global logger. Calls after the first successful one are ignored.
pub fn init_logger(config: &LoggingConfig) -> anyhow::Result<()> {
    if IS_LOGGER_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let result = install(config);
    if result.is_err() {
        IS_LOGGER_INITIALIZED.store(false, Ordering::SeqCst);
    }

    result
}

fn install(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.default_filter))?;

    let console_layer = config.console.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
    });

    let mut guard = None;
    let file_layer = config.directory.as_ref().map(|directory| {
        let file_appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
        let (non_blocking_file_writer, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        fmt::layer()
            .with_writer(non_blocking_file_writer)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    // The file writer stops when the guard is dropped.
    *WORKER_GUARD.lock() = guard;
    debug!("Logger initialized with {config:?}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: LoggingConfig =
            serde_json::from_value(serde_json::json!({"default_filter": "mapconv=trace"})).unwrap();
        assert_eq!(config.default_filter, "mapconv=trace");
        assert_eq!(config.directory, None);
        assert_eq!(config.file_prefix, "mapconv.log");
        assert!(config.console);
    }

    #[test]
    fn invalid_filter_is_reported() {
        let config = LoggingConfig {
            default_filter: "mapconv=notalevel".to_string(),
            ..Default::default()
        };
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(init_logger(&config).is_err());
            assert!(!IS_LOGGER_INITIALIZED.load(Ordering::SeqCst));
        }
    }
}

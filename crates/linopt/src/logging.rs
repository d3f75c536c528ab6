//! Structured logging setup.

use std::env;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors that can occur while installing the log subscriber.
#[derive(Debug)]
pub enum LoggingError {
    /// The level string is not a valid filter directive.
    InvalidFilter { directive: String, reason: String },
    /// `LINOPT_LOG_FORMAT` holds something other than `json` or `pretty`.
    InvalidFormat { value: String },
    /// The log file could not be opened for appending.
    OpenFile { path: String, source: io::Error },
    /// The subscriber could not be installed.
    Init { reason: String },
}

impl LoggingError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter { .. } => "LOGGING_INVALID_FILTER",
            LoggingError::InvalidFormat { .. } => "LOGGING_INVALID_FORMAT",
            LoggingError::OpenFile { .. } => "LOGGING_OPEN_FILE",
            LoggingError::Init { .. } => "LOGGING_INIT_FAILED",
        }
    }
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InvalidFilter { directive, reason } => {
                write!(f, "[{}] Invalid log filter '{}': {}", self.code(), directive, reason)
            }
            LoggingError::InvalidFormat { value } => write!(
                f,
                "[{}] Invalid LINOPT_LOG_FORMAT '{}' (expected 'json' or 'pretty')",
                self.code(),
                value
            ),
            LoggingError::OpenFile { path, source } => {
                write!(f, "[{}] Failed to open log file {}: {}", self.code(), path, source)
            }
            LoggingError::Init { reason } => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::OpenFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_string(),
            source,
        })
}

fn init_failed<E: fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init {
        reason: err.to_string(),
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if level.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
    }
    EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter {
        directive: level.to_string(),
        reason: err.to_string(),
    })
}

/// Install a global `tracing` subscriber for linopt events.
///
/// When `level` is `None`, `LINOPT_TRACE` is read; if that is unset too the
/// level is `off`. `LINOPT_LOG_FORMAT` picks `pretty` (default) or `json`
/// output on stderr, and `LINOPT_LOG_FILE` mirrors events to a file.
///
/// Returns `Ok(true)` when logging was installed and `Ok(false)` if another
/// subscriber is already configured.
///
/// # Errors
///
/// Returns a [`LoggingError`] for an invalid filter or format, an unopenable
/// log file, or a failed installation.
pub fn enable_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var("LINOPT_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = build_filter(&level_value)?;

    let format = env::var("LINOPT_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let log_file = env::var("LINOPT_LOG_FILE").ok();
    let use_json = format.eq_ignore_ascii_case("json");

    if !use_json && !format.eq_ignore_ascii_case("pretty") {
        return Err(LoggingError::InvalidFormat { value: format });
    }

    if use_json {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .json();
            base.with(file_layer).try_init().map_err(init_failed)?;
        } else {
            base.try_init().map_err(init_failed)?;
        }
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .pretty();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .pretty();
            base.with(file_layer).try_init().map_err(init_failed)?;
        } else {
            base.try_init().map_err(init_failed)?;
        }
    }

    tracing::debug!(
        component = "problem",
        operation = "enable_logging",
        status = "success",
        level = %level_value,
        format = %format,
        "Logging enabled"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter() {
        assert!(build_filter("off").is_ok());
        assert!(build_filter("OFF").is_ok());
        assert!(build_filter("linopt=debug").is_ok());
        let err = build_filter("linopt=loud").unwrap_err();
        assert_eq!(err.code(), "LOGGING_INVALID_FILTER");
        assert!(err.to_string().starts_with("[LOGGING_INVALID_FILTER]"));
    }

    #[test]
    fn test_open_log_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_dir").join("linopt.log");
        let err = open_log_file(missing.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code(), "LOGGING_OPEN_FILE");
        assert!(std::error::Error::source(&err).is_some());
    }
}

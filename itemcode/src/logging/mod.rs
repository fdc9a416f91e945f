//! Structured logging infrastructure for ItemCode.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels, and file output.

#[cfg(test)]
mod tests;

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error parsing log level
    InvalidLogLevel(String),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err)
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// When logging to a file the returned guard flushes the background writer on
/// drop, so keep it alive for the lifetime of the program. Calling this twice
/// is harmless; the second call leaves the first subscriber in place.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = log_level_to_level(config.level);

    let (writer, guard) = match (&config.file, config.stdout) {
        (Some(file_path), false) => {
            let (writer, guard) = create_non_blocking_file(file_path)?;
            (Some(writer), Some(guard))
        }
        (Some(_), true) => {
            // stdout wins; a single fmt layer cannot fan out to both
            (None, None)
        }
        (None, _) => (None, None),
    };

    if writer.is_none() && !config.stdout {
        return Ok(None);
    }

    let result = match config.format {
        LogFormat::Json => init_json_logging(level, writer),
        LogFormat::Compact => init_compact_logging(level, writer),
        _ => init_pretty_logging(level, writer),
    };

    match result {
        Ok(()) => {
            if config.file.is_some() && config.stdout {
                tracing::warn!("Configured for stdout only; file logging ignored");
            }
            Ok(guard)
        }
        // Already initialized elsewhere (tests, embedding applications)
        Err(LogError::SubscriberError(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Initialize logging with JSON formatting
fn init_json_logging(level: Level, writer: Option<NonBlocking>) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(level)
        .with_level(true)
        .with_target(true)
        .with_line_number(true);

    match writer {
        Some(writer) => subscriber.with_writer(writer).try_init()?,
        None => subscriber.try_init()?,
    }

    Ok(())
}

/// Initialize logging with compact formatting
fn init_compact_logging(level: Level, writer: Option<NonBlocking>) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_level(true)
        .with_target(true);

    match writer {
        Some(writer) => subscriber.with_writer(writer).try_init()?,
        None => subscriber.try_init()?,
    }

    Ok(())
}

/// Initialize logging with pretty formatting
fn init_pretty_logging(level: Level, writer: Option<NonBlocking>) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(level)
        .with_level(true)
        .with_target(true)
        .with_line_number(true);

    match writer {
        Some(writer) => subscriber.with_writer(writer).try_init()?,
        None => subscriber.try_init()?,
    }

    Ok(())
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
        path.file_name().unwrap_or_default(),
    );

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse::<LogLevel>()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a LogLevel to a tracing::Level.
pub fn log_level_to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::InvalidLogLevel(s) => write!(f, "Invalid log level: {}", s),
        }
    }
}

impl std::error::Error for LogError {}

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{level_to_log_level, log_level_to_level, parse_log_level};
use std::sync::Once;

// Use this to ensure init is only called once across all tests
static INIT: Once = Once::new();

#[test]
fn test_init_console_logging() {
    INIT.call_once(|| {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            file: None,
            stdout: true,
        };

        assert!(crate::logging::init(&config).is_ok());
    });
}

#[test]
fn test_init_twice_is_tolerated() {
    let config = LoggingConfig::default();
    let _ = crate::logging::init(&config);
    assert!(crate::logging::init(&config).is_ok());
}

#[test]
fn test_disabled_output_installs_nothing() {
    let config = LoggingConfig {
        stdout: false,
        file: None,
        ..LoggingConfig::default()
    };
    assert!(crate::logging::init(&config).unwrap().is_none());
}

#[test]
fn test_level_conversion() {
    assert!(parse_log_level("trace").is_ok());
    assert!(parse_log_level("DEBUG").is_ok());
    assert!(parse_log_level("info").is_ok());
    assert!(parse_log_level("warn").is_ok());
    assert!(parse_log_level("error").is_ok());
    assert!(parse_log_level("invalid").is_err());

    assert_eq!(level_to_log_level(tracing::Level::TRACE), LogLevel::Trace);
    assert_eq!(level_to_log_level(tracing::Level::WARN), LogLevel::Warn);
    assert_eq!(log_level_to_level(LogLevel::Error), tracing::Level::ERROR);
    assert_eq!(log_level_to_level(LogLevel::Info), tracing::Level::INFO);
}

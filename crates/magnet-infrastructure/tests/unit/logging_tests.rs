//! Logging Tests

use magnet_domain::error::Error;
use magnet_infrastructure::config::LoggingConfig;
use magnet_infrastructure::logging::{init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_init_logging_installs_once() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        ..Default::default()
    };

    assert!(init_logging(config.clone()).is_ok());
    assert!(init_logging(config).is_err());
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..Default::default()
    };

    assert!(init_logging(config).is_err());
}

#[test]
fn test_init_logging_reports_unusable_log_directory() {
    let blocker = tempfile::NamedTempFile::new().unwrap();
    let config = LoggingConfig {
        file_output: Some(blocker.path().join("magnet.log")),
        ..Default::default()
    };

    let err = init_logging(config).unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }), "got {err:?}");
    assert!(err.to_string().contains("Failed to open log file"));
}

//! Error type tests

use magnet_domain::error::Error;

#[test]
fn test_missing_binding_message_names_type_and_qualifier() {
    let err = Error::missing_binding("dyn app::Mailer", Some("smtp"));

    let message = err.to_string();
    assert!(message.contains("dyn app::Mailer"), "got: {message}");
    assert!(message.contains("'smtp'"), "got: {message}");
}

#[test]
fn test_missing_binding_without_qualifier_uses_default_label() {
    let err = Error::missing_binding("dyn app::Mailer", None);

    assert!(err.to_string().contains("<default>"));
}

#[test]
fn test_multiple_bindings_message_reports_count() {
    let err = Error::multiple_bindings("dyn app::Mailer", None, 3);

    let message = err.to_string();
    assert!(message.contains("3 implementations"), "got: {message}");
}

#[test]
fn test_factory_error_is_transparent() {
    let err = Error::Factory("database unreachable".into());

    assert_eq!(err.to_string(), "database unreachable");
}

#[test]
fn test_config_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err = Error::config_with_source("cannot read magnet.toml", io);

    assert!(err.to_string().contains("cannot read magnet.toml"));
    assert!(std::error::Error::source(&err).is_some());
}

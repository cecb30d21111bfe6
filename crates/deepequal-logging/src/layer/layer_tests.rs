#![allow(non_snake_case)]

use super::*;

#[test]
fn build_filter___without_env___uses_level() {
    // The variable is never set by the test suite.
    if std::env::var(LOG_ENV_VAR).is_ok() {
        return;
    }

    let filter = build_filter(LogLevel::Debug);

    assert_eq!(filter.max_level_hint(), Some(tracing_subscriber::filter::LevelFilter::DEBUG));
}

#[test]
fn build_filter___off___disables_everything() {
    if std::env::var(LOG_ENV_VAR).is_ok() {
        return;
    }

    let filter = build_filter(LogLevel::Off);

    assert_eq!(filter.max_level_hint(), Some(tracing_subscriber::filter::LevelFilter::OFF));
}

#[test]
fn init_logging___twice___does_not_panic() {
    init_logging(LogLevel::Warn);
    init_logging(LogLevel::Trace);

    assert!(ReloadHandle::global().is_initialized());
    assert!(ReloadHandle::global().reload_level(LogLevel::Info).is_ok());
}

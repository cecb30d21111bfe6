//! Subscriber installation

use crate::diagnostics::DiagnosticsLayer;
use crate::reload::{ReloadHandle, convert_level_to_filter};
use deepequal_core::LogLevel;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::reload;

/// Environment variable overriding the configured level
pub const LOG_ENV_VAR: &str = "DEEPEQUAL_LOG";

/// Build the level filter: `DEEPEQUAL_LOG` when set and valid, `level` otherwise
pub fn build_filter(level: LogLevel) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV_VAR) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }
    EnvFilter::default().add_directive(convert_level_to_filter(level).into())
}

/// Initialize the logging system.
///
/// Installs a registry with a reloadable filter, the diagnostics counter
/// and a compact formatter on stderr. Calling it again is a no-op.
pub fn init_logging(level: LogLevel) {
    use tracing_subscriber::prelude::*;

    let (filter, handle) = reload::Layer::new(build_filter(level));
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(DiagnosticsLayer::new())
        .with(fmt);

    // Try to set as global default (ignore error if already set)
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        ReloadHandle::global().set_handle(handle);
    }
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;

//! deepequal-logging - tracing setup for the generator binary
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr formatter behind a reloadable filter
//! - [`ReloadHandle`] for changing the level after startup
//! - [`DiagnosticsLayer`] counting warnings and errors for the run summary

mod diagnostics;
mod layer;
mod reload;

pub use deepequal_core::LogLevel;
pub use diagnostics::{Diagnostic, Diagnostics, DiagnosticsLayer};
pub use layer::{LOG_ENV_VAR, build_filter, init_logging};
pub use reload::ReloadHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Diagnostics, LogLevel, ReloadHandle, init_logging};
}

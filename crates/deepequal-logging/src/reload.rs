//! Dynamic log level reloading support

use crate::layer::build_filter;
use deepequal_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::reload;

type FilterHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

/// Handle for dynamically reloading the log level filter
pub struct ReloadHandle {
    handle: Mutex<Option<FilterHandle>>,
}

impl ReloadHandle {
    /// Create a new reload handle
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Get the global reload handle
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    /// Set the reload handle (called during initialization)
    pub fn set_handle(&self, handle: FilterHandle) {
        *self.handle.lock() = Some(handle);
    }

    #[cfg(test)]
    pub(crate) fn is_initialized(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Reload the filter to use a new log level.
    ///
    /// `DEEPEQUAL_LOG` still wins over `level` when set.
    pub fn reload_level(&self, level: LogLevel) -> Result<(), String> {
        let guard = self.handle.lock();
        if let Some(handle) = guard.as_ref() {
            handle
                .reload(build_filter(level))
                .map_err(|e| format!("Failed to reload filter: {}", e))?;
            Ok(())
        } else {
            Err("Reload handle not initialized".to_string())
        }
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert LogLevel to tracing LevelFilter
pub(crate) fn convert_level_to_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

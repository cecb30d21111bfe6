//! Warning and error capture for the end-of-run summary

use deepequal_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Global diagnostics store
static DIAGNOSTICS: OnceCell<Diagnostics> = OnceCell::new();

/// One captured warning or error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: LogLevel,
    pub message: String,
}

/// Warnings and errors seen since startup (or the last [`Diagnostics::take`]).
#[derive(Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global diagnostics instance
    pub fn global() -> &'static Diagnostics {
        DIAGNOSTICS.get_or_init(Diagnostics::new)
    }

    pub fn record(&self, level: LogLevel, message: impl Into<String>) {
        self.entries.lock().push(Diagnostic {
            level,
            message: message.into(),
        });
    }

    pub fn warnings(&self) -> usize {
        self.count(LogLevel::Warn)
    }

    pub fn errors(&self) -> usize {
        self.count(LogLevel::Error)
    }

    fn count(&self, level: LogLevel) -> usize {
        self.entries.lock().iter().filter(|d| d.level == level).count()
    }

    /// Drain everything captured so far
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }
}

/// Tracing layer recording `WARN` and `ERROR` events into [`Diagnostics`]
pub struct DiagnosticsLayer {
    store: &'static Diagnostics,
}

impl DiagnosticsLayer {
    /// Create a layer using the global store
    pub fn new() -> Self {
        Self {
            store: Diagnostics::global(),
        }
    }

    /// Create a layer with a specific store
    pub fn with_store(store: &'static Diagnostics) -> Self {
        Self { store }
    }

    fn convert_level(level: &Level) -> Option<LogLevel> {
        match *level {
            Level::WARN => Some(LogLevel::Warn),
            Level::ERROR => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl Default for DiagnosticsLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for DiagnosticsLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let Some(level) = Self::convert_level(event.metadata().level()) else {
            return;
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.store.record(level, visitor.message.unwrap_or_default());
    }
}

/// Visitor to extract the message field from tracing events
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }
}

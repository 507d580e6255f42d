//! Logging collaborator for the settings store
//!
//! The store never talks to a logging backend directly. It reports
//! (message, severity) pairs to a [`PluginLogger`], which the host supplies.
//! [`TracingLogger`] is the default adapter onto `tracing`.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Severity of a plugin log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational progress message
    Info,
    /// Something failed; the plugin recovered with a fallback
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("INFO"),
            Severity::Severe => f.write_str("SEVERE"),
        }
    }
}

/// Sink for plugin log messages
pub trait PluginLogger {
    /// Record a message at the given severity
    fn log(&self, message: &str, severity: Severity);

    /// Shorthand for [`Severity::Info`]
    fn info(&self, message: &str) {
        self.log(message, Severity::Info);
    }

    /// Shorthand for [`Severity::Severe`]
    fn severe(&self, message: &str) {
        self.log(message, Severity::Severe);
    }
}

impl<L: PluginLogger + ?Sized> PluginLogger for &L {
    fn log(&self, message: &str, severity: Severity) {
        (**self).log(message, severity);
    }
}

impl<L: PluginLogger + ?Sized> PluginLogger for Arc<L> {
    fn log(&self, message: &str, severity: Severity) {
        (**self).log(message, severity);
    }
}

impl<L: PluginLogger + ?Sized> PluginLogger for Box<L> {
    fn log(&self, message: &str, severity: Severity) {
        (**self).log(message, severity);
    }
}

/// Forwards plugin log messages to `tracing`, prefixed with the plugin name.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    prefix: String,
}

impl TracingLogger {
    pub fn new(plugin_name: impl Into<String>) -> Self {
        Self {
            prefix: plugin_name.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl PluginLogger for TracingLogger {
    fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(target: "afkbooter", "[{}] {}", self.prefix, message),
            Severity::Severe => {
                tracing::error!(target: "afkbooter", "[{}] {}", self.prefix, message)
            }
        }
    }
}

/// Logger that keeps every entry in memory
///
/// Used by tests to assert on what the store reported.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries, oldest first
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().clone()
    }

    /// Messages logged at [`Severity::Severe`]
    pub fn errors(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(severity, _)| *severity == Severity::Severe)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl PluginLogger for RecordingLogger {
    fn log(&self, message: &str, severity: Severity) {
        self.entries.lock().push((severity, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_logger_keeps_order() {
        let logger = RecordingLogger::new();
        logger.info("first");
        logger.severe("second");
        logger.log("third", Severity::Info);

        let entries = logger.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (Severity::Info, "first".to_string()));
        assert_eq!(entries[1], (Severity::Severe, "second".to_string()));
        assert_eq!(logger.errors(), vec!["second".to_string()]);
    }

    #[test]
    fn test_logger_through_reference_and_arc() {
        let logger = Arc::new(RecordingLogger::new());
        let by_ref = &*logger;
        by_ref.info("via ref");
        logger.clone().severe("via arc");

        assert_eq!(logger.entries().len(), 2);
        logger.clear();
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.to_string(), "INFO");
        assert_eq!(Severity::Severe.to_string(), "SEVERE");
    }

    #[test]
    fn test_tracing_logger_prefix() {
        let logger = TracingLogger::new("AfkBooter");
        assert_eq!(logger.prefix(), "AfkBooter");
        // No subscriber installed; must not panic
        logger.info("hello");
        logger.severe("oops");
    }
}

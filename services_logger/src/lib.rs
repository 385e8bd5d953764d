//! # Logger Service
//!
//! This crate implements structured progress logging for workers and the
//! coordinator.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not printf-style. An entry carries
//! its level, the worker it came from, and key/value fields. Rendering and
//! delivery are separate: [`LogEntry::render`] builds the line and
//! [`LogEntry::emit`] hands it to whatever `log` backend the host installed.

use core_types::WorkerId;

/// Target used for every entry emitted by this crate
pub const LOG_TARGET: &str = "pipepair";

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Source worker (if any)
    pub source: Option<WorkerId>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Creates an info entry
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Creates an error entry
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    /// Sets the source worker
    pub fn with_source(mut self, source: WorkerId) -> Self {
        self.source = Some(source);
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Renders the entry as a single line
    ///
    /// Fields follow the message as `key=value` pairs in insertion order.
    pub fn render(&self) -> String {
        let mut line = self.message.clone();
        if let Some(source) = self.source {
            line.push_str(&format!(" source={}", source));
        }
        for (key, value) in &self.fields {
            line.push_str(&format!(" {}={}", key, value));
        }
        line
    }

    /// Emits the entry through the `log` facade
    pub fn emit(&self) {
        log::log!(target: LOG_TARGET, log::Level::from(self.level), "{}", self.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_level_maps_to_facade() {
        assert_eq!(log::Level::from(LogLevel::Info), log::Level::Info);
        assert_eq!(log::Level::from(LogLevel::Error), log::Level::Error);
    }

    #[test]
    fn test_log_entry_creation() {
        let entry = LogEntry::info("test message");
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "test message");
        assert!(entry.source.is_none());
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_log_entry_with_source() {
        let worker_id = WorkerId::new();
        let entry = LogEntry::info("test").with_source(worker_id);
        assert_eq!(entry.source, Some(worker_id));
        assert!(entry.render().contains(&format!("source={}", worker_id)));
    }

    #[test]
    fn test_render_plain_message() {
        let entry = LogEntry::info("Producer: Sent number 3");
        assert_eq!(entry.render(), "Producer: Sent number 3");
    }

    #[test]
    fn test_render_fields_in_order() {
        let entry = LogEntry::error("write failed")
            .with_field("pair", 2)
            .with_field("sent", 4);

        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.render(), "write failed pair=2 sent=4");
    }
}

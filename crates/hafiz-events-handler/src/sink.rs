//! Log sinks
//!
//! The handler never logs through ambient global state. Every entry goes
//! through a [`LogSink`] handed to the coordinator, so embedders decide
//! where diagnostics end up and tests can capture them.

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;
use tracing::{error, info, warn};

/// Named fields attached to a log entry
pub type Fields = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

/// Destination for structured diagnostic entries.
///
/// Implementations must not block on acknowledgement.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, fields: Fields);
}

/// Forwards entries to `tracing`.
///
/// `tracing` needs field names at compile time, so the whole field map is
/// attached as one `fields` value holding its JSON text. Use
/// [`JsonLinesSink`] when the fields must stay nested keys.
#[derive(Debug, Clone)]
pub struct TracingSink {
    service: String,
}

impl TracingSink {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(hafiz_events_core::DEFAULT_SERVICE)
    }
}

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str, fields: Fields) {
        let fields = Value::Object(fields);
        match level {
            LogLevel::Info => info!(service = %self.service, fields = %fields, "{}", message),
            LogLevel::Error => error!(service = %self.service, fields = %fields, "{}", message),
        }
    }
}

/// Writes each entry as one JSON object per line.
///
/// Entry fields become top-level keys next to `timestamp`, `level`,
/// `service` and `message`; those four win on a name clash.
pub struct JsonLinesSink<W> {
    service: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(service: impl Into<String>, writer: W) -> Self {
        Self {
            service: service.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesSink<std::io::Stderr> {
    pub fn stderr(service: impl Into<String>) -> Self {
        Self::new(service, std::io::stderr())
    }
}

impl<W: Write + Send> LogSink for JsonLinesSink<W> {
    fn log(&self, level: LogLevel, message: &str, fields: Fields) {
        let mut entry = fields;
        entry.insert(
            "timestamp".to_string(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        entry.insert("level".to_string(), json!(level));
        entry.insert("service".to_string(), json!(self.service));
        entry.insert("message".to_string(), json!(message));

        let line = match serde_json::to_string(&Value::Object(entry)) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to encode log entry: {}", e);
                return;
            }
        };

        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Failed to write log entry: {}", e);
        }
    }
}

/// One captured entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub fields: Fields,
}

/// Keeps every entry in memory, in emission order
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    /// All entries with the given message
    pub fn find(&self, message: &str) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.message == message)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, message: &str, fields: Fields) {
        self.entries.lock().push(LogEntry {
            level,
            message: message.to_string(),
            fields,
        });
    }
}

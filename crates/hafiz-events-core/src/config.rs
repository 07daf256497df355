//! Configuration for Hafiz Events

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Service name stamped on every log entry
    #[serde(default = "default_service")]
    pub service: String,

    /// Log the untouched inbound payload before processing
    #[serde(default = "default_log_raw_event")]
    pub log_raw_event: bool,

    /// Optional per-batch deadline in milliseconds
    #[serde(default)]
    pub batch_deadline_ms: Option<u64>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_service() -> String {
    crate::DEFAULT_SERVICE.to_string()
}

fn default_log_raw_event() -> bool {
    true
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            log_raw_event: default_log_raw_event(),
            batch_deadline_ms: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl HandlerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            crate::Error::InvalidConfig(format!("Failed to read config: {}", e))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::Error::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(service) = std::env::var("HAFIZ_EVENTS_SERVICE") {
            config.service = service;
        }
        if let Ok(level) = std::env::var("HAFIZ_EVENTS_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("HAFIZ_EVENTS_LOG_FORMAT") {
            config.logging.format = format;
        }
        if let Some(flag) = std::env::var("HAFIZ_EVENTS_LOG_RAW_EVENT")
            .ok()
            .as_deref()
            .and_then(parse_flag)
        {
            config.log_raw_event = flag;
        }
        if let Ok(deadline) = std::env::var("HAFIZ_EVENTS_BATCH_DEADLINE_MS") {
            if let Ok(ms) = deadline.parse() {
                config.batch_deadline_ms = Some(ms);
            }
        }

        config
    }

    /// Per-batch deadline, if configured
    pub fn batch_deadline(&self) -> Option<Duration> {
        self.batch_deadline_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.service.trim().is_empty() {
            return Err(crate::Error::InvalidConfig(
                "service name must not be empty".into(),
            ));
        }
        if self.batch_deadline_ms == Some(0) {
            return Err(crate::Error::InvalidConfig(
                "batch_deadline_ms must be greater than zero".into(),
            ));
        }
        self.logging.validate()
    }
}

/// Parse a boolean switch. Unrecognised values yield `None`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    pub fn validate(&self) -> crate::Result<()> {
        match self.format.to_lowercase().as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(crate::Error::InvalidConfig(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = HandlerConfig::default();
        assert_eq!(config.service, "s3-event-handler");
        assert!(config.log_raw_event);
        assert!(config.batch_deadline().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
service = "ingest-events"
batch_deadline_ms = 2500

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = HandlerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.service, "ingest-events");
        assert!(config.log_raw_event);
        assert_eq!(config.batch_deadline(), Some(Duration::from_millis(2500)));
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = HandlerConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = HandlerConfig::default();
        config.batch_deadline_ms = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_flag() {
        for value in ["0", "false", "FALSE", "no", "Off", " n "] {
            assert_eq!(parse_flag(value), Some(false), "{}", value);
        }
        for value in ["1", "true", "True", "yes", "ON"] {
            assert_eq!(parse_flag(value), Some(true), "{}", value);
        }
        assert_eq!(parse_flag(""), None);
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_missing_file() {
        let err = HandlerConfig::from_file("/nonexistent/hafiz-events.toml").unwrap_err();
        assert_eq!(err.code(), "InvalidConfig");
    }
}

//! Record processor
//!
//! Runs extract → decode → classify → log for a single notification
//! record. Every failure is reported through the sink and turned into a
//! [`ProcessingOutcome::Failure`]; nothing escapes to the caller.

use hafiz_events_core::types::{EventCategory, NotificationRecord, ObjectDescriptor};
use hafiz_events_core::{Error, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::sink::{Fields, LogLevel, LogSink};

/// Result of processing one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Success,
    Failure {
        record_index: usize,
        error_message: String,
    },
}

impl ProcessingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingOutcome::Success)
    }
}

/// Metadata extracted from one record, with the key already decoded
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedEvent {
    pub event_name: String,
    /// As received; never reformatted
    pub event_time: String,
    pub event_source: Option<String>,
    pub aws_region: Option<String>,
    pub object: ObjectDescriptor,
    pub category: EventCategory,
}

impl ExtractedEvent {
    /// Extract and decode a raw record. Pure; no logging.
    pub fn extract(raw: &Value) -> Result<Self> {
        let record = NotificationRecord::from_value(raw)?;
        let object = ObjectDescriptor::decode(&record.s3)?;
        let category = EventCategory::classify(&record.event_name);

        Ok(Self {
            event_name: record.event_name,
            event_time: record.event_time,
            event_source: record.event_source,
            aws_region: record.aws_region,
            object,
            category,
        })
    }

    fn details(&self) -> Fields {
        fields(json!({
            "event_name": self.event_name,
            "event_time": self.event_time,
            "event_source": self.event_source,
            "aws_region": self.aws_region,
            "bucket_name": self.object.bucket_name,
            "bucket_arn": self.object.bucket_arn,
            "object_key": self.object.key,
            "object_size": self.object.size,
            "object_etag": self.object.etag,
            "object_version_id": self.object.version_id,
            "object_sequencer": self.object.sequencer,
        }))
    }
}

/// Processes single records against a log sink
#[derive(Clone)]
pub struct RecordProcessor {
    sink: Arc<dyn LogSink>,
}

impl RecordProcessor {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Process the record at `record_index` of its batch
    pub fn process(&self, record_index: usize, raw: &Value) -> ProcessingOutcome {
        match ExtractedEvent::extract(raw) {
            Ok(event) => {
                self.emit(&event);
                crate::metrics::record_processed(event.category);
                ProcessingOutcome::Success
            }
            Err(e) => self.fail(record_index, &e),
        }
    }

    /// Report a record as failed without processing it
    pub fn fail(&self, record_index: usize, error: &Error) -> ProcessingOutcome {
        let error_message = error.to_string();
        debug!(record_index, code = error.code(), "record failed");

        self.sink.log(
            LogLevel::Error,
            "Error processing S3 event record",
            fields(json!({
                "record_index": record_index,
                "error": error_message,
                "error_code": error.code(),
            })),
        );
        crate::metrics::record_failed(error.code());

        ProcessingOutcome::Failure {
            record_index,
            error_message,
        }
    }

    fn emit(&self, event: &ExtractedEvent) {
        self.sink
            .log(LogLevel::Info, "S3 Event Details", event.details());

        let object = &event.object;
        match event.category {
            EventCategory::Created => self.sink.log(
                LogLevel::Info,
                "Object created event",
                fields(json!({
                    "bucket": object.bucket_name,
                    "key": object.key,
                    "size": object.size,
                    "etag": object.etag,
                })),
            ),
            EventCategory::Removed => self.sink.log(
                LogLevel::Info,
                "Object removed event",
                fields(json!({
                    "bucket": object.bucket_name,
                    "key": object.key,
                })),
            ),
            EventCategory::Other => self.sink.log(
                LogLevel::Info,
                &format!("Unhandled event type: {}", event.event_name),
                fields(json!({ "event_name": event.event_name })),
            ),
        }
    }
}

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

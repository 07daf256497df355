//! Batch coordinator
//!
//! Drives every record of a notification batch through the record
//! processor, in arrival order, and reports one [`BatchResult`].
//!
//! The result's status is always 200: it says the batch ran, not that
//! every record succeeded. Failures are visible in the log entries and in
//! `records_failed`.

use hafiz_events_core::types::NotificationBatch;
use hafiz_events_core::utils::generate_request_id;
use hafiz_events_core::{Error, HandlerConfig, BATCH_STATUS_OK};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info_span};

use crate::processor::RecordProcessor;
use crate::sink::{Fields, LogLevel, LogSink};

/// Aggregate outcome of one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub status_code: u16,
    pub body: String,
    pub records_attempted: usize,
    pub records_failed: usize,
}

impl BatchResult {
    pub fn completed(records_attempted: usize, records_failed: usize) -> Self {
        Self {
            status_code: BATCH_STATUS_OK,
            body: format!("Successfully processed {} record(s)", records_attempted),
            records_attempted,
            records_failed,
        }
    }
}

/// Per-invocation context attached to every diagnostic of a batch
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: Option<String>,
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self {
            request_id: generate_request_id(),
            function_name: None,
        }
    }
}

impl InvocationContext {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: Some(function_name.into()),
            ..Self::default()
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }
}

/// Processes whole notification batches
pub struct BatchCoordinator {
    processor: RecordProcessor,
    sink: Arc<dyn LogSink>,
    config: HandlerConfig,
}

impl BatchCoordinator {
    pub fn new(sink: Arc<dyn LogSink>, config: HandlerConfig) -> Self {
        Self {
            processor: RecordProcessor::new(sink.clone()),
            sink,
            config,
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Process a batch with a fresh invocation context
    pub fn process(&self, batch: &NotificationBatch) -> BatchResult {
        self.process_with_context(batch, &InvocationContext::default())
    }

    pub fn process_with_context(
        &self,
        batch: &NotificationBatch,
        ctx: &InvocationContext,
    ) -> BatchResult {
        let span = info_span!(
            "invocation",
            service = %self.config.service,
            request_id = %ctx.request_id,
            function_name = ?ctx.function_name,
        );
        let _guard = span.enter();

        let started = Instant::now();
        let deadline = self.config.batch_deadline().map(|budget| started + budget);
        let result = self.run(batch, deadline);

        crate::metrics::batch_completed(started.elapsed());
        debug!(
            attempted = result.records_attempted,
            failed = result.records_failed,
            "batch completed"
        );

        result
    }

    fn run(&self, batch: &NotificationBatch, deadline: Option<Instant>) -> BatchResult {
        self.sink
            .log(LogLevel::Info, "Received S3 event notification", Fields::new());

        if self.config.log_raw_event {
            let mut fields = Fields::new();
            fields.insert("raw_event".to_string(), batch.raw().clone());
            self.sink.log(LogLevel::Info, "Raw event", fields);
        }

        let total = batch.len();
        self.sink.log(
            LogLevel::Info,
            &format!("Processing {} record(s)", total),
            Fields::new(),
        );

        let failed = batch
            .records()
            .iter()
            .enumerate()
            .fold(0, |failed, (index, raw)| {
                self.sink.log(
                    LogLevel::Info,
                    &format!("Processing record {}/{}", index + 1, total),
                    Fields::new(),
                );

                let outcome = match deadline {
                    Some(deadline) if Instant::now() >= deadline => self.processor.fail(
                        index,
                        &Error::DeadlineExceeded(self.config.batch_deadline_ms.unwrap_or(0)),
                    ),
                    _ => self.processor.process(index, raw),
                };

                if outcome.is_success() {
                    failed
                } else {
                    failed + 1
                }
            });

        BatchResult::completed(total, failed)
    }
}

impl std::fmt::Debug for BatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("config", &self.config)
            .finish()
    }
}

/// Response in the original `{statusCode, body}` shape, without the counts
pub fn response_json(result: &BatchResult) -> serde_json::Value {
    json!({
        "statusCode": result.status_code,
        "body": result.body,
    })
}

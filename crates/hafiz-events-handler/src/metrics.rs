//! Metrics for the event handler
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding process installs a recorder.

use ::metrics::{counter, histogram};
use hafiz_events_core::types::EventCategory;
use std::time::Duration;

/// Metric names
pub mod names {
    pub const BATCHES_TOTAL: &str = "hafiz_events_batches_total";
    pub const RECORDS_TOTAL: &str = "hafiz_events_records_total";
    pub const RECORD_FAILURES_TOTAL: &str = "hafiz_events_record_failures_total";
    pub const BATCH_DURATION_SECONDS: &str = "hafiz_events_batch_duration_seconds";
}

pub fn record_processed(category: EventCategory) {
    counter!(names::RECORDS_TOTAL, "category" => category.as_str()).increment(1);
}

pub fn record_failed(kind: &'static str) {
    counter!(names::RECORD_FAILURES_TOTAL, "kind" => kind).increment(1);
}

pub fn batch_completed(duration: Duration) {
    counter!(names::BATCHES_TOTAL).increment(1);
    histogram!(names::BATCH_DURATION_SECONDS).record(duration.as_secs_f64());
}

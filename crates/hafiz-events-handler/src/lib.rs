//! Hafiz Events Handler
//!
//! Processes batches of S3 event notifications:
//! - Key decoding and event classification per record
//! - Structured diagnostics through a pluggable log sink
//! - Per-record failure isolation with one aggregate result per batch

pub mod coordinator;
pub mod metrics;
pub mod processor;
pub mod sink;

pub use coordinator::{response_json, BatchCoordinator, BatchResult, InvocationContext};
pub use processor::{ExtractedEvent, ProcessingOutcome, RecordProcessor};
pub use sink::{Fields, JsonLinesSink, LogEntry, LogLevel, LogSink, MemorySink, TracingSink};

//! Hafiz Events Core Library
//!
//! Notification data model, key decoding, event classification and
//! configuration for the Hafiz S3 event notification handler.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::HandlerConfig;
pub use error::{Error, Result};

/// Hafiz Events version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default service name stamped on log entries
pub const DEFAULT_SERVICE: &str = "s3-event-handler";

/// Status code reported for every completed batch
pub const BATCH_STATUS_OK: u16 = 200;

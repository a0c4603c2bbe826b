//! Structured logging for billscan.
//!
//! Console output (pretty or JSON), an optional rolling NDJSON file, and
//! scrubbing of credentials from messages before they are logged.

pub mod logger;
pub mod redact;

pub use logger::{init_logger, LogSettings};
pub use redact::redact_sensitive_data;

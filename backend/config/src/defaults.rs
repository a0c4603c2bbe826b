//! Config defaults applied when a variable is unset or unparsable.

/// Model used when `BILLSCAN_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 8000;

/// Image fetch timeout (seconds).
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Model call timeout (seconds).
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;

/// Model calls allowed in flight at once across all requests.
pub const DEFAULT_MAX_CONCURRENT_MODEL_CALLS: usize = 8;

pub const DEFAULT_LOG_LEVEL: &str = "info";

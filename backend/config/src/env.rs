//! Environment variable names and value parsing.
//!
//! Values are read through a lookup function so the same code serves the
//! real process environment and fixed maps in tests.

use std::str::FromStr;

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Secondary key variable consulted when `GEMINI_API_KEY` is unset or empty.
pub const FALLBACK_API_KEY: &str = "OPENAI_API_KEY";
pub const MODEL: &str = "BILLSCAN_MODEL";
pub const GEMINI_BASE_URL: &str = "BILLSCAN_GEMINI_BASE_URL";
pub const BIND: &str = "BILLSCAN_BIND";
pub const PORT: &str = "BILLSCAN_PORT";
pub const DOWNLOAD_TIMEOUT_SECS: &str = "BILLSCAN_DOWNLOAD_TIMEOUT_SECS";
pub const MODEL_TIMEOUT_SECS: &str = "BILLSCAN_MODEL_TIMEOUT_SECS";
pub const MAX_CONCURRENT_MODEL_CALLS: &str = "BILLSCAN_MAX_CONCURRENT_MODEL_CALLS";
pub const LOG_JSON: &str = "BILLSCAN_LOG_JSON";
pub const LOG_DIR: &str = "BILLSCAN_LOG_DIR";
pub const LOG_LEVEL: &str = "RUST_LOG";

/// Load `.env` from the working directory if present. Existing process
/// variables win over file entries.
pub fn load_dotenv() -> bool {
    dotenvy::dotenv().is_ok()
}

/// Look up a variable, treating empty or whitespace-only values as unset.
pub fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable, falling back to `default` when unset or invalid.
pub fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, name) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value = %raw, "Invalid value, using default");
            default
        }),
    }
}

/// Truthy flags: `1`, `true`, `yes`, `on` (any case).
pub fn flag<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_values_are_unset() {
        let lookup = env(&[("A", "   ")]);
        assert_eq!(non_empty(&lookup, "A"), None);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let lookup = env(&[("PORT", "eighty"), ("OTHER", "9000")]);
        assert_eq!(parse_or(&lookup, "PORT", 8000u16), 8000);
        assert_eq!(parse_or(&lookup, "OTHER", 8000u16), 9000);
        assert_eq!(parse_or(&lookup, "MISSING", 7u64), 7);
    }

    #[test]
    fn flags() {
        let lookup = env(&[("A", "TRUE"), ("B", "0"), ("C", "on")]);
        assert!(flag(&lookup, "A"));
        assert!(!flag(&lookup, "B"));
        assert!(flag(&lookup, "C"));
        assert!(!flag(&lookup, "D"));
    }
}

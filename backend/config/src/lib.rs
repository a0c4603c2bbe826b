//! `billscan-config`: runtime configuration.
//!
//! A [`Config`] is built once at start-up and handed to the components that
//! need it; nothing here is global.

pub mod defaults;
pub mod env;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use billscan_logging::LogSettings;

use defaults::*;

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Model API key; `None` means every model call will be refused.
    pub api_key: Option<String>,
    pub model: String,
    pub gemini_base_url: String,
    pub bind_address: String,
    pub port: u16,
    pub download_timeout: Duration,
    pub model_timeout: Duration,
    pub max_concurrent_model_calls: usize,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Self {
        env::load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env::non_empty(&lookup, env::GEMINI_API_KEY)
            .or_else(|| env::non_empty(&lookup, env::FALLBACK_API_KEY));

        Self {
            api_key,
            model: env::non_empty(&lookup, env::MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: env::non_empty(&lookup, env::GEMINI_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            bind_address: env::non_empty(&lookup, env::BIND)
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port: env::parse_or(&lookup, env::PORT, DEFAULT_PORT),
            download_timeout: Duration::from_secs(env::parse_or(
                &lookup,
                env::DOWNLOAD_TIMEOUT_SECS,
                DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            )),
            model_timeout: Duration::from_secs(env::parse_or(
                &lookup,
                env::MODEL_TIMEOUT_SECS,
                DEFAULT_MODEL_TIMEOUT_SECS,
            )),
            max_concurrent_model_calls: env::parse_or(
                &lookup,
                env::MAX_CONCURRENT_MODEL_CALLS,
                DEFAULT_MAX_CONCURRENT_MODEL_CALLS,
            )
            .max(1),
            log_level: env::non_empty(&lookup, env::LOG_LEVEL)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_json: env::flag(&lookup, env::LOG_JSON),
            log_dir: env::non_empty(&lookup, env::LOG_DIR).map(PathBuf::from),
        }
    }

    /// `host:port` for the HTTP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.log_level.clone(),
            json: self.log_json,
            log_dir: self.log_dir.clone(),
        }
    }
}

// Keep the key out of `{:?}` output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("download_timeout", &self.download_timeout)
            .field("model_timeout", &self.model_timeout)
            .field("max_concurrent_model_calls", &self.max_concurrent_model_calls)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

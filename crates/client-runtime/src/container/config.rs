//! # Client Configuration
//!
//! Unified configuration for the subsystems and the runtime.
//!
//! ## Environment Variables
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TETHER_API_URL` | `api.base_url` | `http://127.0.0.1:8000` |
//! | `TETHER_HTTP_TIMEOUT_SECS` | `api.timeout_secs` | `30` |
//! | `TETHER_DATA_DIR` | `storage.data_dir` | `$HOME/.config/tether` |
//! | `TETHER_RETURN_DELAY_MS` | `lifecycle.return_delay_ms` | `2500` |
//! | `TETHER_LOG` / `RUST_LOG` | `telemetry.log_level` | `info` |
//! | `TETHER_JSON_LOGS` | `telemetry.json_logs` | `false` |

use std::path::PathBuf;
use tc_03_match_lifecycle::MatchLifecycleConfig;
use thiserror::Error;

/// Complete client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Backend connection.
    pub api: ApiConfig,
    /// Local persistence.
    pub storage: StorageConfig,
    /// Match lifecycle timing.
    pub lifecycle: MatchLifecycleConfig,
    /// Logging.
    pub telemetry: TelemetryConfig,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Backend URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("HTTP timeout must be greater than zero")]
    ZeroTimeout,
}

/// Backend connection configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the matching backend, without trailing slash.
    pub base_url: String,
    /// Whole-request timeout in seconds. Photo uploads go through this too.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding `credentials.json`.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config").join("tether"))
            .unwrap_or_else(|| PathBuf::from("./.tether"));
        Self { data_dir }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive.
    pub log_level: String,
    /// JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("TETHER_API_URL") {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("TETHER_HTTP_TIMEOUT_SECS") {
            config.api.timeout_secs = parse_u64("TETHER_HTTP_TIMEOUT_SECS", &raw)?;
        }
        if let Some(dir) = lookup("TETHER_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("TETHER_RETURN_DELAY_MS") {
            config.lifecycle.return_delay_ms = parse_u64("TETHER_RETURN_DELAY_MS", &raw)?;
        }
        if let Some(level) = lookup("TETHER_LOG").or_else(|| lookup("RUST_LOG")) {
            config.telemetry.log_level = level;
        }
        if let Some(raw) = lookup("TETHER_JSON_LOGS") {
            config.telemetry.json_logs = parse_bool("TETHER_JSON_LOGS", &raw)?;
        }

        Ok(config)
    }

    /// Validate before wiring anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.clone()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Config for tests: short return delay, temp-friendly paths set by caller.
    pub fn for_testing(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageConfig {
                data_dir: data_dir.into(),
            },
            lifecycle: MatchLifecycleConfig::for_testing(),
            ..Default::default()
        }
    }
}

fn parse_u64(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
    })
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
        }),
    }
}

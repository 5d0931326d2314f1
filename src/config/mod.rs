#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::{DEFAULT_ELEMENT_ID, DEFAULT_ENDPOINT_PATH};
use crate::core::ConfigProvider;
use crate::utils::error::{CounterError, Result};
use crate::utils::validation::{
    validate_endpoint_path, validate_non_empty_string, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

// 各時間設定的上限
const MAX_TICK_MS: u64 = 60_000;
const MAX_DURATION_MS: u64 = 10 * 60 * 1000;
const MAX_REFRESH_SECS: u64 = 24 * 60 * 60;
const MAX_REQUEST_TIMEOUT_MS: u64 = 10 * 60 * 1000;

/// Resolved settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    pub base_url: String,
    pub endpoint_path: String,
    pub element_id: String,
    pub initial: Option<String>,
    pub duration_ms: u64,
    pub tick_ms: u64,
    pub refresh_secs: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub verbose: bool,
    pub log_json: bool,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            element_id: DEFAULT_ELEMENT_ID.to_string(),
            initial: None,
            duration_ms: 1000,
            tick_ms: 10,
            refresh_secs: None,
            request_timeout_ms: None,
            verbose: false,
            log_json: false,
        }
    }
}

impl ConfigProvider for CounterConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_path(&self) -> &str {
        &self.endpoint_path
    }

    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_secs.map(Duration::from_secs)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl Validate for CounterConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_endpoint_path("endpoint_path", &self.endpoint_path)?;
        validate_non_empty_string("element_id", &self.element_id)?;
        validate_range("tick_ms", self.tick_ms, 1, MAX_TICK_MS)?;
        validate_positive_number("duration_ms", self.duration_ms, self.tick_ms)?;
        validate_range("duration_ms", self.duration_ms, 1, MAX_DURATION_MS)?;

        if let Some(refresh_secs) = self.refresh_secs {
            validate_range("refresh_secs", refresh_secs, 1, MAX_REFRESH_SECS)?;
        }
        if let Some(timeout_ms) = self.request_timeout_ms {
            validate_range("request_timeout_ms", timeout_ms, 1, MAX_REQUEST_TIMEOUT_MS)?;
        }

        if self.verbose && self.log_json {
            return Err(CounterError::ConfigError {
                message: "--verbose and --log-json cannot be combined".to_string(),
            });
        }

        Ok(())
    }
}

use crate::config::CounterConfig;
use crate::utils::error::{CounterError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `--config` 檔案內容，所有欄位皆為選填
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub display: Option<DisplayConfig>,
    pub animation: Option<AnimationConfig>,
    pub refresh: Option<RefreshConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub endpoint_path: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub element_id: Option<String>,
    pub initial: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    pub duration_ms: Option<u64>,
    pub tick_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshConfig {
    pub interval_secs: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${COUNTER_BASE_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CounterError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 將檔案中有設定的欄位覆蓋到 config
    pub fn apply_to(&self, config: &mut CounterConfig) {
        if let Some(source) = &self.source {
            if let Some(base_url) = &source.base_url {
                config.base_url = base_url.clone();
            }
            if let Some(endpoint_path) = &source.endpoint_path {
                config.endpoint_path = endpoint_path.clone();
            }
            if source.request_timeout_ms.is_some() {
                config.request_timeout_ms = source.request_timeout_ms;
            }
        }

        if let Some(display) = &self.display {
            if let Some(element_id) = &display.element_id {
                config.element_id = element_id.clone();
            }
            if display.initial.is_some() {
                config.initial = display.initial.clone();
            }
        }

        if let Some(animation) = &self.animation {
            if let Some(duration_ms) = animation.duration_ms {
                config.duration_ms = duration_ms;
            }
            if let Some(tick_ms) = animation.tick_ms {
                config.tick_ms = tick_ms;
            }
        }

        if let Some(refresh) = &self.refresh {
            if refresh.interval_secs.is_some() {
                config.refresh_secs = refresh.interval_secs;
            }
        }
    }
}

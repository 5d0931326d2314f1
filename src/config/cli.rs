use crate::config::toml_config::TomlConfig;
use crate::config::CounterConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lists-counter")]
#[command(about = "Fetches the enriched-lists count and animates a counter up to it")]
pub struct CliArgs {
    #[arg(long, help = "TOML file with default settings")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Server base URL [default: http://localhost:5000]")]
    pub base_url: Option<String>,

    #[arg(long, help = "Count endpoint path [default: /api/lists_enriched]")]
    pub endpoint_path: Option<String>,

    #[arg(long, help = "Counter element id [default: lists-enriched-counter]")]
    pub element_id: Option<String>,

    #[arg(long, help = "Text the counter shows before the first update")]
    pub initial: Option<String>,

    #[arg(long, help = "Animation length in milliseconds [default: 1000]")]
    pub duration_ms: Option<u64>,

    #[arg(long, help = "Milliseconds between frames [default: 10]")]
    pub tick_ms: Option<u64>,

    #[arg(long, help = "Refetch every N seconds until Ctrl-C")]
    pub refresh_secs: Option<u64>,

    #[arg(long, help = "Give up on the request after N milliseconds")]
    pub request_timeout_ms: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliArgs {
    /// 合併預設值、設定檔與命令列參數 (命令列優先)
    pub fn resolve(&self) -> Result<CounterConfig> {
        let mut config = CounterConfig::default();

        if let Some(path) = &self.config {
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(endpoint_path) = &self.endpoint_path {
            config.endpoint_path = endpoint_path.clone();
        }
        if let Some(element_id) = &self.element_id {
            config.element_id = element_id.clone();
        }
        if self.initial.is_some() {
            config.initial = self.initial.clone();
        }
        if let Some(duration_ms) = self.duration_ms {
            config.duration_ms = duration_ms;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if self.refresh_secs.is_some() {
            config.refresh_secs = self.refresh_secs;
        }
        if self.request_timeout_ms.is_some() {
            config.request_timeout_ms = self.request_timeout_ms;
        }
        config.verbose = self.verbose;
        config.log_json = self.log_json;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_flags_gives_defaults() {
        let args = CliArgs::parse_from(["lists-counter"]);
        assert_eq!(args.resolve().unwrap(), CounterConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nbase_url = \"https://file.example\"\n\n[animation]\ntick_ms = 20\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let args = CliArgs::parse_from([
            "lists-counter",
            "--config",
            path.as_str(),
            "--base-url",
            "https://flag.example",
            "--refresh-secs",
            "60",
        ]);
        let config = args.resolve().unwrap();

        assert_eq!(config.base_url, "https://flag.example");
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.refresh_secs, Some(60));
    }

    #[test]
    fn test_max_refresh_flag_fails_validation() {
        use crate::utils::validation::Validate;

        let args = CliArgs::parse_from(["lists-counter", "--refresh-secs", "18446744073709551615"]);
        let config = args.resolve().unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let args = CliArgs::parse_from(["lists-counter", "--config", "/nonexistent/counter.toml"]);
        let err = args.resolve().unwrap_err();
        assert!(matches!(err, crate::utils::error::CounterError::IoError(_)));
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Display error on #{element_id}: {message}")]
    DisplayError { element_id: String, message: String },
}

impl CounterError {
    /// Short message for the terminal, without the error chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CounterError::ApiError(_) => "Could not reach the count endpoint".to_string(),
            CounterError::IoError(e) => format!("File or terminal error: {}", e),
            CounterError::SerializationError(_) => {
                "The count endpoint returned an unexpected body".to_string()
            }
            CounterError::TomlError(e) => format!("Config file is not valid TOML: {}", e),
            CounterError::ConfigError { message } => message.clone(),
            CounterError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            CounterError::DisplayError { element_id, .. } => {
                format!("Could not update display '{}'", element_id)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CounterError::ApiError(_) => "Check --base-url and that the server is running",
            CounterError::SerializationError(_) => {
                "The endpoint must return {\"lists_enriched\": <integer>}"
            }
            CounterError::IoError(_) | CounterError::TomlError(_) => {
                "Check the path and contents of the --config file"
            }
            CounterError::ConfigError { .. } | CounterError::InvalidConfigValueError { .. } => {
                "Run with --help to see accepted values"
            }
            CounterError::DisplayError { .. } => "Check that the output terminal is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CounterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message_names_field() {
        let err = CounterError::InvalidConfigValueError {
            field: "tick_ms".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value '0' for tick_ms: Value must be at least 1"
        );
        assert_eq!(
            err.user_friendly_message(),
            "Invalid tick_ms: Value must be at least 1"
        );
    }

    #[test]
    fn test_serialization_error_from_serde() {
        let err: CounterError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert!(matches!(err, CounterError::SerializationError(_)));
        assert!(err.recovery_suggestion().contains("lists_enriched"));
    }
}

use serde::{Deserialize, Serialize};

/// Body returned by `GET /api/lists_enriched`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub lists_enriched: u64,
}

/// The value currently shown on the counter element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub value: u64,
}

impl DisplayState {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Reads whatever text the element already holds. Leading whitespace is
    /// skipped and the leading run of ASCII digits is used; anything else
    /// (empty, "abc", "-3") starts the counter at zero.
    pub fn parse(text: &str) -> Self {
        let digits: String = text
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();

        Self {
            value: digits.parse().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The final frame was written; `value` is exactly the end value.
    Completed { value: u64, ticks: u32 },
    /// A newer animation (or the caller) stopped this one.
    Cancelled,
    /// The display rejected a write.
    Failed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_response_ignores_extra_fields() {
        let body = r#"{"lists_enriched": 1234, "updated_at": "2024-05-01"}"#;
        let response: CountResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.lists_enriched, 1234);
    }

    #[test]
    fn test_count_response_rejects_negative() {
        let body = r#"{"lists_enriched": -1}"#;
        assert!(serde_json::from_str::<CountResponse>(body).is_err());
    }

    #[test]
    fn test_count_response_default_is_zero() {
        assert_eq!(CountResponse::default().lists_enriched, 0);
    }

    #[test]
    fn test_display_state_parse() {
        assert_eq!(DisplayState::parse("42").value, 42);
        assert_eq!(DisplayState::parse("  17 lists").value, 17);
        assert_eq!(DisplayState::parse("").value, 0);
        assert_eq!(DisplayState::parse("n/a").value, 0);
        assert_eq!(DisplayState::parse("-5").value, 0);
    }
}

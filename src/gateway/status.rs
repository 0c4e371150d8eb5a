use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aggregate::SessionSummary;
use crate::constants::MODEL_UNAVAILABLE;

/// One fetch worth of gateway state. Built fresh per fetch and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatus {
    pub is_online: bool,
    pub session_count: u64,
    pub total_tokens: u64,
    pub model: String,
    pub last_activity: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl GatewayStatus {
    pub fn online(summary: SessionSummary) -> Self {
        Self {
            is_online: true,
            session_count: summary.session_count,
            total_tokens: summary.total_tokens,
            model: summary.model,
            last_activity: summary.last_activity,
            error: None,
        }
    }

    pub fn offline(message: impl Into<String>) -> Self {
        Self {
            is_online: false,
            session_count: 0,
            total_tokens: 0,
            model: MODEL_UNAVAILABLE.to_string(),
            last_activity: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn offline_status_has_zeroed_fields() {
        let s = GatewayStatus::offline("HTTP error: 500");
        assert!(!s.is_online);
        assert_eq!(s.session_count, 0);
        assert_eq!(s.total_tokens, 0);
        assert_eq!(s.model, "N/A");
        assert_eq!(s.last_activity, None);
        assert_eq!(s.error.as_deref(), Some("HTTP error: 500"));
    }

    #[test]
    fn online_status_carries_summary_and_no_error() {
        let s = GatewayStatus::online(SessionSummary {
            session_count: 3,
            total_tokens: 1_200,
            model: "Claude Opus".to_string(),
            last_activity: DateTime::from_timestamp_millis(2_000),
        });
        assert!(s.is_online);
        assert_eq!(s.error, None);
        assert_eq!(s.session_count, 3);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let s = GatewayStatus::online(SessionSummary {
            session_count: 1,
            total_tokens: 150,
            model: "GPT-4".to_string(),
            last_activity: DateTime::from_timestamp_millis(0),
        });
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(
            v,
            json!({
                "isOnline": true,
                "sessionCount": 1,
                "totalTokens": 150,
                "model": "GPT-4",
                "lastActivity": "1970-01-01T00:00:00Z",
                "error": null
            })
        );
    }
}

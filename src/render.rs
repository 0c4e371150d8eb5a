use chrono::{DateTime, Utc};

use crate::constants::GATEWAY_OFFLINE;
use crate::format::{format_time_ago_at, format_tokens};
use crate::gateway::{GatewayError, GatewayStatus};

const TITLE: &str = "Penelope";

fn status_label(status: &GatewayStatus) -> &'static str {
    if status.is_online {
        "Online"
    } else {
        "Offline"
    }
}

/// The small-widget text block: header line, then stats or the error.
pub fn render_status(status: &GatewayStatus, now: DateTime<Utc>) -> String {
    let mut lines = vec![format!("{TITLE} · {}", status_label(status))];
    if status.is_online {
        lines.push(format!("{} sessions", status.session_count));
        lines.push(format!("{} tokens", format_tokens(status.total_tokens)));
        lines.push(format!("Model: {}", status.model));
        lines.push(format!(
            "Active: {}",
            format_time_ago_at(status.last_activity, now)
        ));
    } else {
        lines.push(
            status
                .error
                .clone()
                .unwrap_or_else(|| GATEWAY_OFFLINE.to_string()),
        );
    }
    lines.join("\n")
}

/// Whether a manual connection test passed: only an online status counts.
pub fn connection_ok(result: &Result<GatewayStatus, GatewayError>) -> bool {
    matches!(result, Ok(s) if s.is_online)
}

/// One line for a manual connection test.
pub fn connection_summary(result: &Result<GatewayStatus, GatewayError>) -> String {
    match result {
        Ok(s) if s.is_online => format!(
            "Success! {} sessions, {} tokens",
            s.session_count,
            format_tokens(s.total_tokens)
        ),
        Ok(s) => format!("Error: {}", s.error.as_deref().unwrap_or(GATEWAY_OFFLINE)),
        Err(e) => format!("Error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SessionSummary;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_767_225_600, 0).unwrap()
    }

    fn online() -> GatewayStatus {
        GatewayStatus::online(SessionSummary {
            session_count: 3,
            total_tokens: 1_234_567,
            model: "Claude Opus".to_string(),
            last_activity: DateTime::from_timestamp(1_767_225_600 - 300, 0),
        })
    }

    #[test]
    fn online_block_lists_formatted_stats() {
        assert_eq!(
            render_status(&online(), now()),
            "Penelope · Online\n3 sessions\n1.2M tokens\nModel: Claude Opus\nActive: 5m ago"
        );
    }

    #[test]
    fn online_block_without_activity_says_never() {
        let mut s = online();
        s.last_activity = None;
        assert!(render_status(&s, now()).ends_with("Active: Never"));
    }

    #[test]
    fn offline_block_shows_error_text() {
        let s = GatewayStatus::offline("HTTP error: 502");
        assert_eq!(render_status(&s, now()), "Penelope · Offline\nHTTP error: 502");
    }

    #[test]
    fn offline_block_falls_back_to_generic_message() {
        let mut s = GatewayStatus::offline("x");
        s.error = None;
        assert_eq!(render_status(&s, now()), "Penelope · Offline\nGateway offline");
    }

    #[test]
    fn connection_test_passes_only_when_online() {
        assert!(connection_ok(&Ok(online())));
        assert!(!connection_ok(&Ok(GatewayStatus::offline("HTTP error: 500"))));
        assert!(!connection_ok(&Err(GatewayError::MissingConfiguration)));
        assert!(!connection_ok(&Err(GatewayError::InvalidUrl("x".to_string()))));
    }

    #[test]
    fn header_label_follows_online_flag() {
        assert_eq!(status_label(&online()), "Online");
        assert_eq!(status_label(&GatewayStatus::offline("x")), "Offline");
    }

    #[test]
    fn connection_summary_lines() {
        assert_eq!(
            connection_summary(&Ok(online())),
            "Success! 3 sessions, 1.2M tokens"
        );
        assert_eq!(
            connection_summary(&Ok(GatewayStatus::offline("HTTP error: 500"))),
            "Error: HTTP error: 500"
        );
        assert_eq!(
            connection_summary(&Err(GatewayError::MissingConfiguration)),
            "Error: Gateway URL or token not configured"
        );
    }
}

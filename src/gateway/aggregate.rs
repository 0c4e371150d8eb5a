use chrono::{DateTime, Utc};

use super::envelope::Session;
use crate::constants::{MODEL_UNAVAILABLE, PRIMARY_SESSION_KEY};
use crate::format::map_model_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Echoed from the gateway; not checked against `sessions.len()`.
    pub session_count: u64,
    pub total_tokens: u64,
    pub model: String,
    pub last_activity: Option<DateTime<Utc>>,
}

/// Folds the session list into the numbers the widget shows.
///
/// Single pass in received order. The model comes from the primary session only; if the
/// gateway ever reports several of them, the last one wins. Activity keeps the first of equal
/// maxima.
pub fn aggregate(count: u64, sessions: &[Session]) -> SessionSummary {
    let mut total_tokens = 0u64;
    let mut model = MODEL_UNAVAILABLE.to_string();
    let mut last_activity: Option<DateTime<Utc>> = None;

    for session in sessions {
        total_tokens = total_tokens.saturating_add(session.total_tokens.unwrap_or(0));

        if session.key == PRIMARY_SESSION_KEY {
            if let Some(raw) = session.model.as_deref() {
                model = map_model_name(raw);
            }
        }

        let Some(at) = session.updated_at.and_then(DateTime::from_timestamp_millis) else {
            continue;
        };
        if last_activity.map(|cur| at > cur).unwrap_or(true) {
            last_activity = Some(at);
        }
    }

    SessionSummary {
        session_count: count,
        total_tokens,
        model,
        last_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(key: &str, model: Option<&str>, tokens: Option<u64>, at: Option<i64>) -> Session {
        Session {
            key: key.to_string(),
            model: model.map(str::to_string),
            total_tokens: tokens,
            updated_at: at,
        }
    }

    fn ms(v: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(v)
    }

    #[test]
    fn empty_list_yields_defaults() {
        let s = aggregate(0, &[]);
        assert_eq!(
            s,
            SessionSummary {
                session_count: 0,
                total_tokens: 0,
                model: "N/A".to_string(),
                last_activity: None,
            }
        );
    }

    #[test]
    fn sums_tokens_takes_primary_model_and_latest_activity() {
        let sessions = [
            session("agent:main:main", Some("gpt-4"), Some(100), Some(1000)),
            session("other", None, Some(50), Some(2000)),
        ];
        let s = aggregate(2, &sessions);
        assert_eq!(s.total_tokens, 150);
        assert_eq!(s.model, "GPT-4");
        assert_eq!(s.last_activity, ms(2000));
        assert_eq!(s.session_count, 2);
    }

    #[test]
    fn missing_tokens_count_as_zero() {
        let sessions = [
            session("a", None, None, None),
            session("b", None, Some(7), None),
        ];
        assert_eq!(aggregate(2, &sessions).total_tokens, 7);
    }

    #[test]
    fn model_ignores_non_primary_sessions() {
        let sessions = [
            session("agent:main:subagent:1", Some("claude-3-opus"), Some(1), Some(5)),
            session("cron:daily", Some("gpt-4"), Some(1), Some(6)),
        ];
        assert_eq!(aggregate(2, &sessions).model, "N/A");
    }

    #[test]
    fn primary_session_without_model_keeps_placeholder() {
        let sessions = [session("agent:main:main", None, Some(10), None)];
        assert_eq!(aggregate(1, &sessions).model, "N/A");
    }

    #[test]
    fn last_primary_session_wins() {
        let sessions = [
            session("agent:main:main", Some("gpt-4"), None, None),
            session("agent:main:main", Some("claude-opus-4-5"), None, None),
            session("agent:main:main", None, None, None),
        ];
        assert_eq!(aggregate(3, &sessions).model, "Claude Opus");
    }

    #[test]
    fn primary_model_goes_through_the_name_mapper() {
        let sessions = [session("agent:main:main", Some("llama-3-70b"), None, None)];
        assert_eq!(aggregate(1, &sessions).model, "Llama 3 70b");
    }

    #[test]
    fn activity_is_the_maximum_regardless_of_order() {
        let sessions = [
            session("a", None, None, Some(3000)),
            session("b", None, None, None),
            session("c", None, None, Some(9000)),
            session("d", None, None, Some(4000)),
        ];
        assert_eq!(aggregate(4, &sessions).last_activity, ms(9000));
    }

    #[test]
    fn count_is_echoed_verbatim() {
        let sessions = [session("a", None, Some(1), None)];
        assert_eq!(aggregate(42, &sessions).session_count, 42);
        assert_eq!(aggregate(0, &sessions).session_count, 0);
    }

    #[test]
    fn token_sum_saturates() {
        let sessions = [
            session("a", None, Some(u64::MAX), None),
            session("b", None, Some(10), None),
        ];
        assert_eq!(aggregate(2, &sessions).total_tokens, u64::MAX);
    }
}

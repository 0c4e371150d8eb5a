use chrono::{DateTime, Utc};

const MODEL_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("claude-opus-4-5", "Claude Opus"),
    ("claude-sonnet-4", "Claude Sonnet"),
    ("claude-3-5-sonnet", "Sonnet 3.5"),
    ("claude-3-opus", "Opus 3"),
    ("gpt-4", "GPT-4"),
    ("gpt-4-turbo", "GPT-4 Turbo"),
];

/// Short display label for a raw model id.
///
/// Known ids come from a fixed table (exact, case-sensitive match). Anything else is turned into
/// words: dashes become spaces and each word gets an upper-cased first letter, the rest of the
/// word is left alone (`llama-3-70b` -> `Llama 3 70b`).
pub fn map_model_name(raw: &str) -> String {
    if let Some((_, display)) = MODEL_DISPLAY_NAMES.iter().find(|(id, _)| *id == raw) {
        return (*display).to_string();
    }

    let spaced = raw.replace('-', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// `1_234_567` -> `1.2M`, `1_500` -> `1.5K`, `999` -> `999`.
pub fn format_tokens(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        scaled_one_decimal(tokens, 1_000_000, 'M')
    } else if tokens >= 1_000 {
        scaled_one_decimal(tokens, 1_000, 'K')
    } else {
        tokens.to_string()
    }
}

// Half-up rounding to one decimal, done in integer space.
fn scaled_one_decimal(n: u64, unit: u64, suffix: char) -> String {
    let unit = u128::from(unit);
    let tenths = (u128::from(n) * 10 + unit / 2) / unit;
    format!("{}.{}{suffix}", tenths / 10, tenths % 10)
}

pub fn format_time_ago(ts: Option<DateTime<Utc>>) -> String {
    format_time_ago_at(ts, Utc::now())
}

/// Relative age of `ts` as seen from `now`, bucketed by minute, hour and day.
/// Timestamps ahead of `now` count as "Just now".
pub fn format_time_ago_at(ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = ts else {
        return "Never".to_string();
    };
    let age = now.signed_duration_since(ts).num_seconds();
    if age < 60 {
        "Just now".to_string()
    } else if age < 3_600 {
        format!("{}m ago", age / 60)
    } else if age < 86_400 {
        format!("{}h ago", age / 3_600)
    } else {
        format!("{}d ago", age / 86_400)
    }
}

//! Follower counts from raw page text, used when nothing structured matched.

use std::sync::LazyLock;

use regex::Regex;

use super::number::to_number;

/// JSON-like fragments tried in order; at least two digits are required.
static KEYED_COUNTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)"followerCount"\s*:\s*([0-9]{2,})"#,
        r#"(?i)"follower_count"\s*:\s*([0-9]{2,})"#,
        r#"(?i)"fans"\s*:\s*([0-9]{2,})"#,
        r#"(?i)"fan_count"\s*:\s*([0-9]{2,})"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("invalid keyed count pattern"))
    .collect()
});

/// Unlike the meta-description token, a leading separator is kept (`.5K` is 500).
static HUMAN_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([\d.,]*\d[\d.,]*(?:\s*[km])?)\s*followers?").expect("invalid human count pattern")
});

/// Scan for keyed fragments first, then for a human-readable token.
pub fn extract(html: &str) -> Option<u64> {
    for pattern in KEYED_COUNTS.iter() {
        if let Some(count) = pattern
            .captures(html)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
        {
            return Some(count);
        }
    }

    let token = HUMAN_COUNT.captures(html)?.get(1)?;
    to_number(token.as_str())
}

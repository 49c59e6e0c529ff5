//! Follower counts from the social-preview description.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::number::to_number;

static OG_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:description"]"#).expect("invalid selector"));

static FOLLOWER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d.,]*(?:\s*[km])?)\s*followers?").expect("invalid follower token pattern"));

/// Read the `og:description` content and pull out `<number> followers`.
pub fn extract(document: &Html) -> Option<u64> {
    let content = document
        .select(&OG_DESCRIPTION)
        .find_map(|meta| meta.value().attr("content"))?;

    from_description(content)
}

/// Find the first `<number>[K|M] follower(s)` token in a description.
pub fn from_description(text: &str) -> Option<u64> {
    let token = FOLLOWER_TOKEN.captures(text)?.get(1)?;
    to_number(token.as_str())
}

//! Best-effort follower count extraction from a profile page.
//!
//! ### Strategy chain
//! Strategies run in a fixed order and the first that yields a number wins:
//! 1. Embedded hydration state (`<script id="SIGI_STATE">` and friends), searched
//!    for follower-like keys.
//! 2. The `og:description` meta tag, searched for `<number> followers`.
//! 3. Raw page text, searched for `"followerCount":N`-style fragments and then
//!    for a human-readable `<number> followers` token.
//!
//! Every failure inside a strategy (missing tag, malformed JSON, unparseable
//! number) only means that strategy produced nothing.

pub mod meta;
pub mod number;
pub mod raw;
pub mod state;

use std::fmt;

use scraper::Html;
use serde::{Deserialize, Serialize};

pub use number::{number_from_f64, to_number};
pub use state::{NodeView, StateNode, find_follower_count};

/// Which strategy produced a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    EmbeddedState,
    MetaDescription,
    RawPattern,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::EmbeddedState => "embedded-state",
            Source::MetaDescription => "meta-description",
            Source::RawPattern => "raw-pattern",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the strategy chain over one document.
///
/// `count` and `source` are either both present or both absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub count: Option<u64>,
    pub source: Option<Source>,
}

impl ExtractionResult {
    pub fn found(count: u64, source: Source) -> Self {
        Self { count: Some(count), source: Some(source) }
    }

    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        self.count.is_some()
    }
}

/// Run the strategy chain over an HTML document.
///
/// Pure function of the document text: no I/O, never fails.
pub fn extract(html: &str) -> ExtractionResult {
    let document = Html::parse_document(html);

    let found = state::extract(&document, html)
        .map(|count| (count, Source::EmbeddedState))
        .or_else(|| meta::extract(&document).map(|count| (count, Source::MetaDescription)))
        .or_else(|| raw::extract(html).map(|count| (count, Source::RawPattern)));

    match found {
        Some((count, source)) => {
            tracing::debug!(count, source = %source, "follower count extracted");
            ExtractionResult::found(count, source)
        }
        None => {
            tracing::debug!(chars = html.len(), "no follower count in document");
            ExtractionResult::not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_state() {
        let html = r#"<html><head>
            <meta property="og:description" content="1.2M Followers on TikTok">
            <script id="SIGI_STATE" type="application/json">{"stats":{"followerCount":48213}}</script>
        </head></html>"#;
        assert_eq!(extract(html), ExtractionResult::found(48213, Source::EmbeddedState));
    }

    #[test]
    fn test_meta_description_when_no_state() {
        let html = r#"<html><head><meta property="og:description" content="1.2M Followers on TikTok"></head></html>"#;
        assert_eq!(extract(html), ExtractionResult::found(1_200_000, Source::MetaDescription));
    }

    #[test]
    fn test_meta_description_when_state_is_malformed() {
        let html = r#"<html><head>
            <script id="SIGI_STATE">{"stats":</script>
            <meta property="og:description" content="310 Followers">
        </head></html>"#;
        assert_eq!(extract(html), ExtractionResult::found(310, Source::MetaDescription));
    }

    #[test]
    fn test_raw_pattern_last() {
        let html = r#"<html><body><script>var cfg = {"fan_count":77};</script></body></html>"#;
        assert_eq!(extract(html), ExtractionResult::found(77, Source::RawPattern));
    }

    #[test]
    fn test_nothing_anywhere() {
        let html = "<html><head><title>Profile</title></head><body>Hello</body></html>";
        let result = extract(html);
        assert_eq!(result, ExtractionResult { count: None, source: None });
        assert!(!result.is_found());
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract(""), ExtractionResult::not_found());
    }

    #[test]
    fn test_zero_is_found() {
        let html = r#"<script id="SIGI_STATE">{"stats":{"followerCount":0}}</script>"#;
        let result = extract(html);
        assert_eq!(result.count, Some(0));
        assert!(result.is_found());
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_value(ExtractionResult::found(77, Source::RawPattern)).unwrap();
        assert_eq!(json, serde_json::json!({"count": 77, "source": "raw-pattern"}));

        let json = serde_json::to_value(ExtractionResult::not_found()).unwrap();
        assert_eq!(json, serde_json::json!({"count": null, "source": null}));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::MetaDescription.to_string(), "meta-description");
    }
}

//! Cache → fetch → extract → store orchestration.
//!
//! Every lookup ends in one of three outcomes: a count was found (zero
//! included), the page was fetched but held no count, or the page could not be
//! fetched. Each outcome is cached for the configured TTL, failures included,
//! so a broken source is not hammered.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use followcount_client::{FetchClient, FetchConfig, ProfileSource, Source, extract, normalize_handle, profile_url, snippet};
use followcount_core::{AppConfig, Error, ResultCache};
use serde::{Deserialize, Serialize};

/// Coarse lookup state reported alongside the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Found,
    NotFound,
    Unavailable,
}

/// What a lookup produced; this is what gets cached.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Found { count: u64, source: Source },
    NotFound,
    Unavailable { error: &'static str, note: String, details: Option<String> },
}

/// Extra fields returned when the caller asks for debug output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub url: String,
    pub fetched_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_detected: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_snippet: Option<String>,
}

/// Response body for a follower lookup.
///
/// `followers` is `null` unless `status` is `found`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerReport {
    pub followers: Option<u64>,
    pub status: LookupStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Underlying error text for transport failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

impl FollowerReport {
    fn from_outcome(outcome: &Outcome, cached: bool) -> Self {
        let mut report = Self {
            followers: None,
            status: LookupStatus::NotFound,
            source: None,
            cached,
            error: None,
            note: None,
            details: None,
            debug: None,
        };

        match outcome {
            Outcome::Found { count, source } => {
                report.followers = Some(*count);
                report.status = LookupStatus::Found;
                report.source = Some(*source);
            }
            Outcome::NotFound => {
                report.note = Some("no follower count found on profile page".into());
            }
            Outcome::Unavailable { error, note, details } => {
                report.status = LookupStatus::Unavailable;
                report.error = Some((*error).to_string());
                report.note = Some(note.clone());
                report.details = details.clone();
            }
        }

        report
    }

    /// Report for a failure that happened before any fetch was attempted.
    fn rejected(err: &Error) -> Self {
        Self::from_outcome(&Outcome::Unavailable { error: err.kind(), note: err.to_string(), details: None }, false)
    }
}

/// Follower lookups with a shared result cache.
///
/// Built once at startup; clones of the `Arc` share the cache and fetcher.
pub struct LookupService {
    source: Arc<dyn ProfileSource>,
    cache: ResultCache<Outcome>,
    profile_url_template: String,
    default_user: String,
    snippet_chars: usize,
}

impl LookupService {
    pub fn new(source: Arc<dyn ProfileSource>, cache: ResultCache<Outcome>, config: &AppConfig) -> Self {
        Self {
            source,
            cache,
            profile_url_template: config.profile_url_template.clone(),
            default_user: normalize_handle(&config.default_user),
            snippet_chars: config.snippet_chars,
        }
    }

    /// Wire up the real HTTP fetcher and a fresh cache from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(config))?;
        Ok(Self::new(Arc::new(fetcher), ResultCache::new(config.cache_ttl()), config))
    }

    #[cfg(test)]
    pub fn cache(&self) -> &ResultCache<Outcome> {
        &self.cache
    }

    /// Resolve the handle to look up, falling back to the default.
    pub fn resolve_handle(&self, identifier: Option<&str>) -> String {
        let handle = identifier.map(normalize_handle).unwrap_or_default();
        if handle.is_empty() { self.default_user.clone() } else { handle }
    }

    /// Look up the follower count for `identifier`, serving from cache when fresh.
    ///
    /// Never fails: every error is folded into the returned report.
    pub async fn lookup(&self, identifier: Option<&str>, debug: bool) -> FollowerReport {
        let handle = self.resolve_handle(identifier);

        if let Some(entry) = self.cache.get(&handle).await {
            tracing::debug!(handle = %handle, outcome = ?entry.value, "serving cached lookup");
            return FollowerReport::from_outcome(&entry.value, true);
        }

        let url = match profile_url(&self.profile_url_template, &handle) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(handle = %handle, "cannot build profile url: {err}");
                return FollowerReport::rejected(&err);
            }
        };

        if debug {
            tracing::info!("fetching {url}");
        }

        let fetched = self.source.fetch_page(&url).await;
        let fetched_at = Utc::now();

        let mut debug_info =
            DebugInfo { url: url.to_string(), fetched_at: fetched_at.to_rfc3339(), ..Default::default() };

        let outcome = match fetched {
            Ok(page) => {
                if page.final_url != url {
                    tracing::debug!(handle = %handle, "profile redirected to {}", page.final_url);
                }
                let result = extract(&page.html);
                debug_info.fetched_chars = Some(page.html.chars().count());
                debug_info.source_detected = result.source;
                debug_info.snippet = Some(snippet(&page.html, self.snippet_chars));

                match (result.count, result.source) {
                    (Some(count), Some(source)) => Outcome::Found { count, source },
                    _ => Outcome::NotFound,
                }
            }
            Err(err) => {
                let (note, details) = match &err {
                    Error::HttpStatus { status, body_snippet } => {
                        debug_info.status = Some(*status);
                        debug_info.body_snippet = Some(body_snippet.clone());
                        (format!("fetch returned {status}"), None)
                    }
                    other => {
                        tracing::error!(handle = %handle, "failed to fetch profile page: {other}");
                        ("fetch failed".to_string(), Some(other.to_string()))
                    }
                };
                Outcome::Unavailable { error: err.kind(), note, details }
            }
        };

        let purged = self.cache.purge_expired().await;
        if purged > 0 {
            tracing::debug!(purged, "dropped expired lookups");
        }
        self.cache.put(&handle, outcome.clone(), Instant::now()).await;

        let mut report = FollowerReport::from_outcome(&outcome, false);
        if debug {
            report.debug = Some(debug_info);
            tracing::info!(handle = %handle, followers = ?report.followers, status = ?report.status, "lookup result");
        }
        report
    }
}

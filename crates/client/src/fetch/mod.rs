//! HTTP fetch of profile pages.
//!
//! ### Request shape
//! - Browser-like User-Agent and `Accept` headers, configurable `Accept-Language`
//! - Bounded timeout; expiry is reported as a fetch failure
//! - Max redirects: 5 (configurable)
//! - Max body bytes: 5MB (configurable)
//!
//! ### Failure mapping
//! - Non-success status → `Error::HttpStatus` with a body snippet for debugging
//! - Timeout → `Error::FetchTimeout`
//! - Anything else on the wire → `Error::Network`

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use followcount_core::{AppConfig, Error};
use reqwest::{Client, header};
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,

    /// Accept-Language header value (default: "en-US,en;q=0.9")
    pub accept_language: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 10s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,

    /// Characters of an error body kept for debugging (default: 1200)
    pub snippet_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
            snippet_chars: config.snippet_chars,
        }
    }
}

/// A successfully fetched profile page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The final URL after redirects
    pub final_url: Url,
    /// Decoded body (lossy UTF-8)
    pub html: String,
}

/// Anything that can hand back the HTML of a profile page.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the page at `url`.
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, Error>;
}

/// First `chars` characters of `text`.
pub fn snippet(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}

/// reqwest-backed profile fetcher.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_str(&config.accept_language)
                .map_err(|e| Error::Client(format!("invalid accept_language: {e}")))?,
        );

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Client(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    fn check_size(&self, len: usize) -> Result<(), Error> {
        if len > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }
        Ok(())
    }
}

fn transport_error(url: &Url, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout(format!("{url}: {err}"))
    } else {
        Error::Network(format!("{url}: {err}"))
    }
}

fn decode(bytes: &Bytes) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[async_trait]
impl ProfileSource for FetchClient {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if let Some(len) = response.content_length() {
            self.check_size(len as usize)?;
        }

        let bytes = response.bytes().await.map_err(|e| transport_error(url, e))?;

        if !status.is_success() {
            tracing::warn!("fetch returned {} for {}", status.as_u16(), url);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body_snippet: snippet(&decode(&bytes), self.config.snippet_chars),
            });
        }

        self.check_size(bytes.len())?;

        let html = decode(&bytes);
        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, final_url, fetch_ms, bytes.len());

        Ok(FetchedPage { final_url, html })
    }
}

//! Test doubles shared by the lookup, HTTP and tool tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use followcount_client::{FetchedPage, ProfileSource};
use followcount_core::{AppConfig, Error, ResultCache};
use url::Url;

use crate::lookup::LookupService;

pub const STATE_PAGE: &str = r#"<html><head>
    <script id="SIGI_STATE" type="application/json">{"UserModule":{"stats":{"followerCount":48213}}}</script>
</head><body></body></html>"#;

/// Canned response handed out by [`StubSource`].
#[derive(Debug, Clone)]
pub enum Canned {
    Html(String),
    Status(u16, String),
    Network,
}

/// In-memory profile source that counts fetches and remembers the last URL.
pub struct StubSource {
    canned: Canned,
    calls: AtomicUsize,
    last_url: Mutex<Option<String>>,
}

impl StubSource {
    pub fn new(canned: Canned) -> Arc<Self> {
        Arc::new(Self { canned, calls: AtomicUsize::new(0), last_url: Mutex::new(None) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileSource for StubSource {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(url.to_string());

        match &self.canned {
            Canned::Html(html) => Ok(FetchedPage { final_url: url.clone(), html: html.clone() }),
            Canned::Status(status, body) => Err(Error::HttpStatus { status: *status, body_snippet: body.clone() }),
            Canned::Network => Err(Error::Network("connection reset".into())),
        }
    }
}

/// Lookup service over `source` with default configuration.
pub fn service(source: Arc<StubSource>, ttl: Duration) -> LookupService {
    LookupService::new(source, ResultCache::new(ttl), &AppConfig::default())
}

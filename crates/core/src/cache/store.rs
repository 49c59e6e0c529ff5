//! TTL store backed by a `HashMap` behind a tokio `RwLock`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::key::cache_key;

/// A cached value together with the moment it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    pub value: V,
    pub fetched_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Whether the entry is still fresh at `now` for the given TTL.
    ///
    /// Fresh means `now - fetched_at < ttl`; a `now` earlier than `fetched_at`
    /// counts as zero age.
    pub fn is_fresh_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// Process-wide result cache keyed by normalized identifier.
///
/// Cloning is cheap and every clone shares the same map. Entries are never
/// evicted on their own; stale ones are skipped on read and can be dropped
/// with [`ResultCache::purge_expired`].
#[derive(Debug, Clone)]
pub struct ResultCache<V> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<V: Clone> ResultCache<V> {
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    /// Look up a fresh entry for `identifier` as of now.
    pub async fn get(&self, identifier: &str) -> Option<CacheEntry<V>> {
        self.get_at(identifier, Instant::now()).await
    }

    /// Look up a fresh entry for `identifier` as of `now`.
    ///
    /// Expired entries are treated as absent.
    pub async fn get_at(&self, identifier: &str, now: Instant) -> Option<CacheEntry<V>> {
        let key = cache_key(identifier);
        let entries = self.entries.read().await;
        let entry = entries.get(&key)?;

        if entry.is_fresh_at(now, self.ttl) {
            tracing::debug!(key = %key, "result cache hit");
            Some(entry.clone())
        } else {
            tracing::debug!(key = %key, "result cache entry expired");
            None
        }
    }

    /// Store `value` for `identifier`, replacing whatever was there.
    pub async fn put(&self, identifier: &str, value: V, fetched_at: Instant) {
        let key = cache_key(identifier);
        let mut entries = self.entries.write().await;
        entries.insert(key, CacheEntry { value, fetched_at });
    }

    /// Number of stored entries, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry that is stale as of now.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh_at(now, self.ttl));
        before - entries.len()
    }
}

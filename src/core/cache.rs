//! Request cache keyed by endpoint and serialized parameters.
//!
//! Entries hold raw response bodies. Freshness is decided by the caller at lookup time, so one
//! cache can serve endpoints with different freshness windows. Each entry also carries the
//! window it was stored with; expired entries are pruned on every write.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Identity of a cached request: an endpoint plus its parameters in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Start a key for `endpoint`.
    pub fn new(endpoint: &str) -> CacheKeyBuilder {
        CacheKeyBuilder {
            endpoint: endpoint.to_string(),
            params: BTreeMap::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accumulates parameters for a [`CacheKey`]. Later values replace earlier ones for the same name.
#[derive(Debug, Clone)]
pub struct CacheKeyBuilder {
    endpoint: String,
    params: BTreeMap<String, String>,
}

impl CacheKeyBuilder {
    #[must_use]
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Adds the parameter only when `value` is present.
    #[must_use]
    pub fn opt_param(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    pub fn build(self) -> CacheKey {
        let mut key = self.endpoint;
        let mut sep = '?';
        for (k, v) in &self.params {
            key.push(sep);
            key.push_str(k);
            key.push('=');
            key.push_str(v);
            sep = '&';
        }
        CacheKey(key)
    }
}

#[derive(Debug)]
struct CacheEntry {
    body: String,
    stored_at: Instant,
    /// `None` when the window is too large to represent.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|t| t <= now)
    }
}

/// In-memory response cache shared between clones of a [`crate::TfClient`].
#[derive(Debug, Default)]
pub struct RequestCache {
    map: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body if it was stored less than `freshness` ago.
    ///
    /// An entry past its own expiry is removed.
    pub async fn get(&self, key: &CacheKey, freshness: Duration) -> Option<String> {
        let now = Instant::now();
        {
            let guard = self.map.read().await;
            let entry = guard.get(key)?;
            if now.duration_since(entry.stored_at) < freshness {
                return Some(entry.body.clone());
            }
            if !entry.expired(now) {
                return None;
            }
        }
        let mut guard = self.map.write().await;
        if guard.get(key).is_some_and(|e| e.expired(now)) {
            guard.remove(key);
        }
        None
    }

    /// Stores `body` under `key`, expiring `ttl` from now, and prunes expired entries.
    pub async fn put(&self, key: CacheKey, body: String, ttl: Duration) {
        let now = Instant::now();
        let entry = CacheEntry {
            body,
            stored_at: now,
            expires_at: now.checked_add(ttl),
        };
        let mut guard = self.map.write().await;
        guard.retain(|_, e| !e.expired(now));
        guard.insert(key, entry);
    }

    pub async fn invalidate(&self, key: &CacheKey) {
        self.map.write().await.remove(key);
    }

    pub async fn clear(&self) {
        self.map.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.map.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.map.read().await.is_empty()
    }
}

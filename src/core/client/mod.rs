//! Public client surface + builder.
//! Internals are split into `retry` (backoff + cache modes) and `constants` (endpoints + defaults).

pub(crate) mod constants;
pub(crate) mod retry;

pub use constants::BASE_URL_ENV;
pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::cache::{CacheKey, RequestCache};
use crate::core::TfError;
use constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, USER_AGENT};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Handle to the Time-Flow backend.
///
/// Cheap to clone: clones share the HTTP connection pool and the request cache.
#[derive(Debug, Clone)]
pub struct TfClient {
    http: Client,
    base_url: Url,
    cache: Option<Arc<RequestCache>>,
}

impl TfClient {
    /// Create a new builder.
    pub fn builder() -> TfClientBuilder {
        TfClientBuilder::default()
    }

    /// Build a client from the environment (see [`TfClientBuilder::from_env`]).
    pub fn from_env() -> Result<Self, TfError> {
        TfClientBuilder::from_env().build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// The shared request cache, if caching is enabled.
    pub fn cache(&self) -> Option<&Arc<RequestCache>> {
        self.cache.as_ref()
    }

    /* -------- internal helpers used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Resolve an absolute endpoint path against the base URL, keeping any base path prefix.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, TfError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    pub(crate) async fn cache_get(&self, key: &CacheKey, freshness: Duration) -> Option<String> {
        self.cache.as_ref()?.get(key, freshness).await
    }

    pub(crate) async fn cache_put(&self, key: &CacheKey, body: &str, ttl: Duration) {
        if let Some(cache) = &self.cache {
            cache.put(key.clone(), body.to_string(), ttl).await;
        }
    }
}

/* ----------------------- Builder ----------------------- */

pub struct TfClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache: Option<Arc<RequestCache>>,
    cache_enabled: bool,
}

impl Default for TfClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            base_url: None,
            timeout: None,
            connect_timeout: None,
            cache: None,
            cache_enabled: true,
        }
    }
}

impl TfClientBuilder {
    /// Start a builder with the base URL taken from `TIMEFLOW_API_BASE_URL`, if set and valid.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Ok(raw) = std::env::var(BASE_URL_ENV) {
            match Url::parse(raw.trim()) {
                Ok(url) => builder.base_url = Some(url),
                Err(e) => {
                    tracing::warn!(var = BASE_URL_ENV, value = %raw, error = %e, "ignoring invalid base URL");
                }
            }
        }
        builder
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the backend base URL (e.g., `https://api.time-flow.tech`).
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the overall request timeout. Default: 15s.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Share an existing request cache instead of creating a private one.
    pub fn cache(mut self, cache: Arc<RequestCache>) -> Self {
        self.cache = Some(cache);
        self.cache_enabled = true;
        self
    }

    /// Disable response caching entirely.
    pub fn no_cache(mut self) -> Self {
        self.cache = None;
        self.cache_enabled = false;
        self
    }

    pub fn build(self) -> Result<TfClient, TfError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .default_headers(headers)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        let cache = if self.cache_enabled {
            Some(self.cache.unwrap_or_default())
        } else {
            None
        };

        Ok(TfClient {
            http,
            base_url,
            cache,
        })
    }
}

mod api;
mod model;
mod paginator;
mod symbol;
mod wire;

pub use model::{LatestNews, NewsArticle, NewsPage};
pub use paginator::{FeedEffect, FeedEvent, FeedState, NewsPaginator, PageRequest};
pub use symbol::{extract_source_name, extract_symbol, filter_by_symbol};

use std::time::Duration;

use crate::core::client::constants::{
    LATEST_NEWS_LIMIT, LATEST_NEWS_POLL_INTERVAL, NEWS_FRESHNESS, NEWS_HISTORY_FRESHNESS,
    NEWS_HISTORY_LIMIT,
};
use crate::core::{CacheMode, RetryConfig, TfClient, TfError};
use crate::poll::{self, PollHandle};

/// A builder for the most recent articles (`/news`).
#[derive(Clone)]
pub struct LatestNewsBuilder {
    client: TfClient,
    limit: u32,
    freshness: Duration,
    poll_interval: Duration,
    cache_mode: CacheMode,
    retry: RetryConfig,
}

impl LatestNewsBuilder {
    pub fn new(client: &TfClient) -> Self {
        Self {
            client: client.clone(),
            limit: LATEST_NEWS_LIMIT,
            freshness: NEWS_FRESHNESS,
            poll_interval: LATEST_NEWS_POLL_INTERVAL,
            cache_mode: CacheMode::Use,
            retry: RetryConfig::standard(),
        }
    }

    /// Sets the maximum number of articles to return. Default: 20.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the retry policy. Default: 2 retries.
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    /// How long fetched articles are served from cache. Default: 2 minutes.
    #[must_use]
    pub const fn freshness(mut self, dur: Duration) -> Self {
        self.freshness = dur;
        self
    }

    /// Poll cadence used by [`LatestNewsBuilder::poll`]. Default: 5 minutes.
    #[must_use]
    pub const fn poll_interval(mut self, dur: Duration) -> Self {
        self.poll_interval = dur;
        self
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns the last `TfError` once the retry policy gives up.
    #[tracing::instrument(skip(self), err, fields(limit = self.limit))]
    pub async fn fetch(self) -> Result<LatestNews, TfError> {
        api::fetch_latest(
            &self.client,
            self.limit,
            self.freshness,
            self.cache_mode,
            &self.retry,
        )
        .await
    }

    /// Start polling: fetch now, then every `poll_interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn poll(self) -> PollHandle<LatestNews> {
        let every = self.poll_interval;
        poll::spawn("news_latest", every, move |mode| {
            let builder = self.clone().cache_mode(mode);
            Box::pin(builder.fetch())
        })
    }
}

/// A builder for one explicit page of the news archive (`/news/history`).
///
/// For "load more" accumulation use [`NewsPaginator`] instead.
#[derive(Clone)]
pub struct NewsHistoryBuilder {
    client: TfClient,
    limit: u32,
    offset: u32,
    source: Option<String>,
    freshness: Duration,
    cache_mode: CacheMode,
    retry: RetryConfig,
}

impl NewsHistoryBuilder {
    pub fn new(client: &TfClient) -> Self {
        Self {
            client: client.clone(),
            limit: NEWS_HISTORY_LIMIT,
            offset: 0,
            source: None,
            freshness: NEWS_HISTORY_FRESHNESS,
            cache_mode: CacheMode::Use,
            retry: RetryConfig::standard(),
        }
    }

    /// Articles per page. Default: 50.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Position of the first article. Default: 0.
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Server-side source filter.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the retry policy. Default: 2 retries.
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    /// How long a fetched page is served from cache. Default: 5 minutes.
    #[must_use]
    pub const fn freshness(mut self, dur: Duration) -> Self {
        self.freshness = dur;
        self
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns `TfError::InvalidParams` for a zero limit, or the last request error once
    /// the retry policy gives up.
    #[tracing::instrument(skip(self), err, fields(limit = self.limit, offset = self.offset))]
    pub async fn fetch(self) -> Result<NewsPage, TfError> {
        api::fetch_history(
            &self.client,
            self.limit,
            self.offset,
            self.source.as_deref(),
            self.freshness,
            self.cache_mode,
            &self.retry,
        )
        .await
    }
}

mod api;
mod model;
mod wire;

pub use model::{Quote, QuoteSnapshot};

use std::time::Duration;

use crate::core::client::constants::{QUOTES_FRESHNESS, QUOTES_POLL_INTERVAL};
use crate::core::{CacheMode, RetryConfig, TfClient, TfError};
use crate::poll::{self, PollHandle};

/// A running quote poller. See [`QuotesBuilder::poll`].
pub type QuotePoller = PollHandle<QuoteSnapshot>;

/// Fetch the current quote snapshot for every tracked symbol.
pub async fn quotes(client: &TfClient) -> Result<QuoteSnapshot, TfError> {
    QuotesBuilder::new(client).fetch().await
}

/// Builder for quote snapshots and the quote poller.
#[derive(Clone)]
pub struct QuotesBuilder {
    client: TfClient,
    freshness: Duration,
    poll_interval: Duration,
    cache_mode: CacheMode,
    retry: RetryConfig,
}

impl QuotesBuilder {
    pub fn new(client: &TfClient) -> Self {
        Self {
            client: client.clone(),
            freshness: QUOTES_FRESHNESS,
            poll_interval: QUOTES_POLL_INTERVAL,
            cache_mode: CacheMode::Use,
            retry: RetryConfig::quotes(),
        }
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the retry policy. Default: 3 retries, `min(1s * 2^n, 30s)` apart.
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    /// How long a fetched snapshot is served from cache. Default: 5s.
    #[must_use]
    pub const fn freshness(mut self, dur: Duration) -> Self {
        self.freshness = dur;
        self
    }

    /// Poll cadence used by [`QuotesBuilder::poll`]. Default: 10s.
    #[must_use]
    pub const fn poll_interval(mut self, dur: Duration) -> Self {
        self.poll_interval = dur;
        self
    }

    /// Fetch one snapshot.
    ///
    /// # Errors
    ///
    /// Returns the last `TfError` once the retry policy gives up.
    #[tracing::instrument(skip(self), err)]
    pub async fn fetch(self) -> Result<QuoteSnapshot, TfError> {
        api::fetch_snapshot(&self.client, self.freshness, self.cache_mode, &self.retry).await
    }

    /// Start polling: fetch now, then every `poll_interval`.
    ///
    /// The last good snapshot stays in the handle's state when a later poll fails.
    /// Must be called from within a tokio runtime.
    pub fn poll(self) -> QuotePoller {
        let every = self.poll_interval;
        poll::spawn("quotes", every, move |mode| {
            let builder = self.clone().cache_mode(mode);
            Box::pin(builder.fetch())
        })
    }
}

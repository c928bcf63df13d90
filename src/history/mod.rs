mod model;
mod range;
mod wire;

pub use model::{HistoricalData, HistoricalPoint};
pub use range::{TimeRange, format_timestamp, time_range_dates};

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::core::client::constants::{HISTORICAL_FRESHNESS, PATH_HISTORICAL};
use crate::core::client::retry;
use crate::core::net::{self, ApiRequest};
use crate::core::{CacheKey, CacheMode, RetryConfig, TfClient, TfError};
use wire::{HistoricalEnvelope, PointNode};

/// A builder for fetching the stored quote history of a single symbol.
///
/// The request is keyed by `(symbol, range)` for caching, so the moving `from`/`to` pair
/// does not defeat the freshness window.
#[derive(Clone)]
pub struct HistoricalBuilder {
    client: TfClient,
    symbol: String,
    range: TimeRange,
    period: Option<(DateTime<Utc>, DateTime<Utc>)>,
    enabled: bool,
    freshness: Duration,
    cache_mode: CacheMode,
    retry: RetryConfig,
}

impl HistoricalBuilder {
    /// Creates a new builder for `symbol`. The symbol is upper-cased.
    pub fn new(client: &TfClient, symbol: impl AsRef<str>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.as_ref().trim().to_uppercase(),
            range: TimeRange::default(),
            period: None,
            enabled: true,
            freshness: HISTORICAL_FRESHNESS,
            cache_mode: CacheMode::Use,
            retry: RetryConfig::standard(),
        }
    }

    /// Sets the look-back window. Default: 24h.
    ///
    /// Clears any period set with `between()`.
    #[must_use]
    pub fn range(mut self, range: TimeRange) -> Self {
        self.period = None;
        self.range = range;
        self
    }

    /// Sets an absolute window instead of a relative range.
    #[must_use]
    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.period = Some((from, to));
        self
    }

    /// When `false`, `fetch` does nothing and returns `Ok(None)`.
    #[must_use]
    pub const fn enabled(mut self, yes: bool) -> Self {
        self.enabled = yes;
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

    /// How long a fetched series is served from cache. Default: 1 minute.
    #[must_use]
    pub const fn freshness(mut self, dur: Duration) -> Self {
        self.freshness = dur;
        self
    }

    /// Executes the request.
    ///
    /// Returns `Ok(None)` without touching the network when the builder is disabled or
    /// the symbol is empty.
    ///
    /// # Errors
    ///
    /// Returns `TfError::InvalidParams` if an explicit period does not start before it ends,
    /// or the last request error once retries are exhausted.
    #[tracing::instrument(skip(self), err, fields(symbol = %self.symbol, range = %self.range))]
    pub async fn fetch(self) -> Result<Option<HistoricalData>, TfError> {
        if !self.enabled || self.symbol.is_empty() {
            return Ok(None);
        }

        let (from, to, key) = match self.period {
            Some((from, to)) => {
                if from >= to {
                    return Err(TfError::InvalidParams(
                        "historical period must start before it ends".into(),
                    ));
                }
                let (from, to) = (format_timestamp(from), format_timestamp(to));
                let key = CacheKey::new("finhub/historical")
                    .param("symbol", &self.symbol)
                    .param("from", &from)
                    .param("to", &to)
                    .build();
                (from, to, key)
            }
            None => {
                let (from, to) = time_range_dates(self.range);
                let key = CacheKey::new("finhub/historical")
                    .param("symbol", &self.symbol)
                    .param("range", self.range)
                    .build();
                (from, to, key)
            }
        };

        let req = ApiRequest::get(
            PATH_HISTORICAL,
            key,
            format!("failed to retrieve historical data for {}", self.symbol),
        )
        .param("symbol", &self.symbol)
        .param("from", from)
        .param("to", to)
        .freshness(self.freshness)
        .cache_mode(self.cache_mode);

        let envelope: HistoricalEnvelope = retry::run(&self.retry, "historical", || {
            net::get_json(&self.client, &req)
        })
        .await?;

        Ok(Some(HistoricalData {
            symbol: envelope.symbol,
            from: envelope.from,
            to: envelope.to,
            count: envelope.count,
            data: envelope.data.into_iter().map(map_point).collect(),
        }))
    }
}

fn map_point(n: PointNode) -> HistoricalPoint {
    HistoricalPoint {
        id: n.id,
        symbol: n.symbol,
        current_price: n.current_price,
        change: n.change,
        percent_change: n.percent_change,
        high: n.high,
        low: n.low,
        open: n.open,
        previous_close: n.previous_close,
        timestamp: n.timestamp,
        created_at: n.created_at,
    }
}

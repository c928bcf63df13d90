//! Centralized constants for default endpoints, timings, and UA.

use std::time::Duration;

/// Default User-Agent sent with every request.
pub(crate) const USER_AGENT: &str = concat!("timeflow-rs/", env!("CARGO_PKG_VERSION"));

/// Production backend host.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.time-flow.tech";

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "TIMEFLOW_API_BASE_URL";

/// Hard cap on a single HTTP call.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/* -------- endpoint paths -------- */

pub(crate) const PATH_QUOTES: &str = "/finhub/quotes";
pub(crate) const PATH_HISTORICAL: &str = "/finhub/historical";
pub(crate) const PATH_NEWS_LATEST: &str = "/news";
pub(crate) const PATH_NEWS_HISTORY: &str = "/news/history";

/* -------- polling and freshness -------- */

/// Quote snapshot refresh cadence.
pub(crate) const QUOTES_POLL_INTERVAL: Duration = Duration::from_secs(10);
/// A quote snapshot is served from cache for this long.
pub(crate) const QUOTES_FRESHNESS: Duration = Duration::from_secs(5);

/// Historical series are served from cache for this long.
pub(crate) const HISTORICAL_FRESHNESS: Duration = Duration::from_secs(60);

/// Latest-news refresh cadence.
pub(crate) const LATEST_NEWS_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);
/// Latest news and paginated feed pages are served from cache for this long.
pub(crate) const NEWS_FRESHNESS: Duration = Duration::from_secs(2 * 60);
/// One-shot news history queries are served from cache for this long.
pub(crate) const NEWS_HISTORY_FRESHNESS: Duration = Duration::from_secs(5 * 60);

/* -------- paging -------- */

pub(crate) const LATEST_NEWS_LIMIT: u32 = 20;
pub(crate) const NEWS_HISTORY_LIMIT: u32 = 50;
/// Articles requested per page by the infinite feed.
pub(crate) const FEED_PAGE_SIZE: u32 = 20;

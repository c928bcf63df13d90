//! timeflow-rs: async client for the Time-Flow market data backend.
//!
//! - [`QuotesBuilder`] fetches the live quote snapshot and can poll it on an interval.
//! - [`HistoricalBuilder`] fetches a stored series for one symbol over a [`TimeRange`].
//! - [`LatestNewsBuilder`] and [`NewsHistoryBuilder`] fetch news articles.
//! - [`NewsPaginator`] accumulates news pages for an infinite feed with a symbol filter.
//!
//! Every request goes through one [`TfClient`], which owns the HTTP pool, the 15 second
//! timeout, and an injected [`RequestCache`].
//!
//! ```no_run
//! use timeflow_rs::{QuotesBuilder, TfClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TfClient::from_env()?;
//! let snapshot = QuotesBuilder::new(&client).fetch().await?;
//! if let Some(q) = snapshot.get("AAPL") {
//!     println!("AAPL {:.2} ({:+.2}%)", q.current_price, q.percent_change);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod history;
pub mod news;
pub mod poll;
pub mod quote;
pub mod symbols;

pub use crate::core::{
    Backoff, CacheKey, CacheMode, RequestCache, RequestErrorKind, RetryConfig, TfClient,
    TfClientBuilder, TfError,
};
pub use history::{HistoricalBuilder, HistoricalData, HistoricalPoint, TimeRange};
pub use news::{
    FeedEffect, FeedEvent, FeedState, LatestNews, LatestNewsBuilder, NewsArticle,
    NewsHistoryBuilder, NewsPage, NewsPaginator, PageRequest, extract_source_name,
    extract_symbol,
};
pub use poll::{PollEffect, PollEvent, PollHandle, PollState};
pub use quote::{Quote, QuotePoller, QuoteSnapshot, QuotesBuilder};

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `timeflow_rs=info`).
///
/// Calling it more than once is harmless.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("timeflow_rs=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

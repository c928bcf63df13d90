//! Infinite news feed with an optional symbol filter.
//!
//! [`FeedState::reduce`] is a pure transition `(state, event) -> (state', effect)`.
//! [`NewsPaginator`] drives it against the backend; other drivers can feed it themselves.
//!
//! Responses are matched against the filter and offset they were requested for. A response
//! for a filter that is no longer selected, or for an offset that is no longer pending, is
//! dropped instead of being merged.

use std::time::Duration;

use crate::core::client::constants::{FEED_PAGE_SIZE, NEWS_FRESHNESS};
use crate::core::{CacheMode, RetryConfig, TfClient};
use crate::news::api;
use crate::news::model::{NewsArticle, NewsPage};
use crate::news::symbol::filter_by_symbol;

/// A page the driver must fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Filter the page belongs to; also sent as the `source` parameter.
    pub filter: Option<String>,
    pub offset: u32,
    pub cache_mode: CacheMode,
}

/// Inputs to the feed state machine.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A consumer started showing the feed.
    Mount,
    /// The selected symbol changed (`None` shows everything).
    FilterChanged(Option<String>),
    /// Pull to refresh: reload from offset 0, bypassing the freshness window.
    UserRefresh,
    /// The consumer is close to the end of what is rendered.
    ScrollNearEnd,
    /// A requested page arrived.
    PageLoaded {
        filter: Option<String>,
        offset: u32,
        page: NewsPage,
    },
    /// A requested page failed after its retries.
    PageFailed {
        filter: Option<String>,
        offset: u32,
        message: String,
    },
    /// The driver gave up on a requested page before it arrived.
    PageCancelled { filter: Option<String>, offset: u32 },
}

/// What the driver must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEffect {
    None,
    Fetch(PageRequest),
}

/// Accumulated pages for the current filter.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    filter: Option<String>,
    pages: Vec<NewsPage>,
    pending: Option<u32>,
    error: Option<String>,
    mounted: bool,
}

impl FeedState {
    pub fn new(filter: Option<String>) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Pages in fetch order.
    pub fn pages(&self) -> &[NewsPage] {
        &self.pages
    }

    /// Every loaded article, pages concatenated in fetch order.
    pub fn all_articles(&self) -> impl Iterator<Item = &NewsArticle> {
        self.pages.iter().flat_map(|p| p.articles.iter())
    }

    /// Loaded articles, re-filtered client-side by the selected symbol.
    ///
    /// The server-side filter is not trusted: articles whose source does not end with the
    /// selected symbol are dropped here.
    pub fn articles(&self) -> Vec<&NewsArticle> {
        match &self.filter {
            Some(symbol) => filter_by_symbol(self.all_articles(), symbol),
            None => self.all_articles().collect(),
        }
    }

    /// Offset of the next page, if there is one.
    pub fn next_offset(&self) -> Option<u32> {
        self.pages.last().and_then(NewsPage::next_offset)
    }

    pub fn has_next_page(&self) -> bool {
        self.next_offset().is_some()
    }

    /// Whether every page has been loaded.
    pub fn is_exhausted(&self) -> bool {
        !self.pages.is_empty() && !self.has_next_page()
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    /// A page beyond the first is in flight.
    pub fn is_fetching_next_page(&self) -> bool {
        self.pending.is_some_and(|o| o > 0)
    }

    /// Server-side total reported by the first page.
    pub fn total(&self) -> Option<u32> {
        self.pages.first().map(|p| p.total)
    }

    /// Message of the last failed page fetch; cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn request(&mut self, offset: u32, cache_mode: CacheMode) -> FeedEffect {
        self.pending = Some(offset);
        FeedEffect::Fetch(PageRequest {
            filter: self.filter.clone(),
            offset,
            cache_mode,
        })
    }

    fn is_current(&self, filter: &Option<String>, offset: u32) -> bool {
        *filter == self.filter && self.pending == Some(offset)
    }

    /// Apply `event`, returning the next state and the effect to run.
    pub fn reduce(mut self, event: FeedEvent) -> (Self, FeedEffect) {
        let effect = match event {
            FeedEvent::Mount => {
                self.mounted = true;
                if self.pages.is_empty() && self.pending.is_none() {
                    self.request(0, CacheMode::Use)
                } else {
                    FeedEffect::None
                }
            }
            FeedEvent::FilterChanged(filter) => {
                if filter == self.filter {
                    FeedEffect::None
                } else {
                    self.filter = filter;
                    self.pages.clear();
                    self.pending = None;
                    self.error = None;
                    if self.mounted {
                        self.request(0, CacheMode::Use)
                    } else {
                        FeedEffect::None
                    }
                }
            }
            FeedEvent::UserRefresh => {
                self.mounted = true;
                self.request(0, CacheMode::Refresh)
            }
            FeedEvent::ScrollNearEnd => {
                if self.pending.is_some() {
                    FeedEffect::None
                } else if let Some(next) = self.next_offset() {
                    self.request(next, CacheMode::Use)
                } else {
                    FeedEffect::None
                }
            }
            FeedEvent::PageLoaded {
                filter,
                offset,
                page,
            } => {
                if self.is_current(&filter, offset) {
                    if offset == 0 {
                        self.pages = vec![page];
                    } else {
                        self.pages.push(page);
                    }
                    self.pending = None;
                    self.error = None;
                } else {
                    tracing::debug!(?filter, offset, "dropping stale news page");
                }
                FeedEffect::None
            }
            FeedEvent::PageFailed {
                filter,
                offset,
                message,
            } => {
                if self.is_current(&filter, offset) {
                    self.pending = None;
                    self.error = Some(message);
                }
                FeedEffect::None
            }
            FeedEvent::PageCancelled { filter, offset } => {
                if self.is_current(&filter, offset) {
                    self.pending = None;
                }
                FeedEffect::None
            }
        };
        (self, effect)
    }
}

/// Drives a [`FeedState`] against `/news/history`.
///
/// Each method applies one event and, if it calls for a page, fetches it before returning.
///
/// ```no_run
/// # use timeflow_rs::{NewsPaginator, TfClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TfClient::from_env()?;
/// let mut feed = NewsPaginator::new(&client);
/// feed.mount().await;
/// while feed.state().has_next_page() && feed.state().error().is_none() {
///     feed.scroll_near_end().await;
/// }
/// println!("{} articles", feed.state().articles().len());
/// # Ok(())
/// # }
/// ```
pub struct NewsPaginator {
    client: TfClient,
    state: FeedState,
    page_size: u32,
    freshness: Duration,
    retry: RetryConfig,
}

impl NewsPaginator {
    pub fn new(client: &TfClient) -> Self {
        Self {
            client: client.clone(),
            state: FeedState::default(),
            page_size: FEED_PAGE_SIZE,
            freshness: NEWS_FRESHNESS,
            retry: RetryConfig::standard(),
        }
    }

    /// Articles per page. Default: 20.
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// How long a fetched page is served from cache. Default: 2 minutes.
    #[must_use]
    pub fn freshness(mut self, dur: Duration) -> Self {
        self.freshness = dur;
        self
    }

    /// Overrides the retry policy. Default: 2 retries.
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    /// Initial filter, applied before the first page is fetched.
    #[must_use]
    pub fn filter(mut self, symbol: Option<impl Into<String>>) -> Self {
        self.state = FeedState::new(symbol.map(Into::into));
        self
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Shorthand for `state().articles()`.
    pub fn articles(&self) -> Vec<&NewsArticle> {
        self.state.articles()
    }

    pub async fn mount(&mut self) {
        self.dispatch(FeedEvent::Mount).await;
    }

    pub async fn set_filter(&mut self, symbol: Option<String>) {
        self.dispatch(FeedEvent::FilterChanged(symbol)).await;
    }

    pub async fn refresh(&mut self) {
        self.dispatch(FeedEvent::UserRefresh).await;
    }

    pub async fn scroll_near_end(&mut self) {
        self.dispatch(FeedEvent::ScrollNearEnd).await;
    }

    /// Apply `event` and run whatever it asks for.
    ///
    /// Dropping the returned future while a page is in flight releases that page, so the
    /// next scroll or refresh can request it again.
    pub async fn dispatch(&mut self, event: FeedEvent) {
        let FeedEffect::Fetch(req) = apply(&mut self.state, event) else {
            return;
        };

        let in_flight = InFlight {
            state: &mut self.state,
            filter: req.filter.clone(),
            offset: req.offset,
            settled: false,
        };
        let result = api::fetch_history(
            &self.client,
            self.page_size,
            req.offset,
            req.filter.as_deref(),
            self.freshness,
            req.cache_mode,
            &self.retry,
        )
        .await;

        let event = match result {
            Ok(page) => FeedEvent::PageLoaded {
                filter: req.filter,
                offset: req.offset,
                page,
            },
            Err(e) => FeedEvent::PageFailed {
                filter: req.filter,
                offset: req.offset,
                message: e.to_string(),
            },
        };
        in_flight.settle(event);
    }
}

fn apply(state: &mut FeedState, event: FeedEvent) -> FeedEffect {
    let (next, effect) = std::mem::take(state).reduce(event);
    *state = next;
    effect
}

/// Marks a requested page as in flight until it settles or is dropped.
struct InFlight<'a> {
    state: &'a mut FeedState,
    filter: Option<String>,
    offset: u32,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, event: FeedEvent) {
        self.settled = true;
        apply(&mut *self.state, event);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!(filter = ?self.filter, offset = self.offset, "news page cancelled");
            apply(
                &mut *self.state,
                FeedEvent::PageCancelled {
                    filter: self.filter.take(),
                    offset: self.offset,
                },
            );
        }
    }
}

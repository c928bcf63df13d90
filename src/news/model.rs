use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::news::symbol::{extract_source_name, extract_symbol};

/// A single news article.
///
/// The backend does not guarantee a unique id; lists identify articles by `(url, position)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsArticle {
    pub id: Option<i64>,
    /// Publisher label, optionally suffixed with a symbol: `"Bloomberg (AAPL)"`.
    pub source: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewsArticle {
    /// The symbol encoded in the source label, if any.
    pub fn symbol(&self) -> Option<&str> {
        extract_symbol(&self.source)
    }

    /// The publisher name without the symbol suffix.
    pub fn source_name(&self) -> &str {
        extract_source_name(&self.source)
    }
}

/// Most recent articles from the backend's cache (`/news`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestNews {
    pub articles: Vec<NewsArticle>,
    pub timestamp: DateTime<Utc>,
    pub count: u32,
}

/// One bounded batch of articles at a given offset (`/news/history`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsPage {
    pub articles: Vec<NewsArticle>,
    /// Articles in this page.
    pub count: u32,
    /// Articles available across all pages.
    pub total: u32,
    /// Page size that was requested.
    pub limit: u32,
    /// Position of the first article of this page.
    pub offset: u32,
}

impl NewsPage {
    /// Offset of the following page, or `None` when this is the last one.
    ///
    /// A page that reports `limit == 0` advances by the articles it actually holds,
    /// and an empty one ends pagination.
    pub fn next_offset(&self) -> Option<u32> {
        let step = if self.limit > 0 {
            self.limit
        } else {
            u32::try_from(self.articles.len()).unwrap_or(u32::MAX)
        };
        if step == 0 {
            return None;
        }
        let next = self.offset.saturating_add(step);
        (next < self.total).then_some(next)
    }

    pub fn has_next(&self) -> bool {
        self.next_offset().is_some()
    }
}

use std::time::Duration;

use crate::{
    core::{
        CacheKey, CacheMode, RetryConfig, TfClient, TfError,
        client::{
            constants::{PATH_NEWS_HISTORY, PATH_NEWS_LATEST},
            retry,
        },
        net::{self, ApiRequest},
    },
    news::{
        model::{LatestNews, NewsArticle, NewsPage},
        wire::{ArticleNode, HistoryEnvelope, LatestEnvelope},
    },
};

pub(super) async fn fetch_latest(
    client: &TfClient,
    limit: u32,
    freshness: Duration,
    cache_mode: CacheMode,
    retry_cfg: &RetryConfig,
) -> Result<LatestNews, TfError> {
    let req = ApiRequest::get(
        PATH_NEWS_LATEST,
        CacheKey::new("news/latest").param("limit", limit).build(),
        "failed to retrieve the latest news",
    )
    .param("limit", limit)
    .freshness(freshness)
    .cache_mode(cache_mode);

    let envelope: LatestEnvelope =
        retry::run(retry_cfg, "news_latest", || net::get_json(client, &req)).await?;

    check_count("news_latest", envelope.count, envelope.articles.len());

    Ok(LatestNews {
        articles: envelope.articles.into_iter().map(map_article).collect(),
        timestamp: envelope.timestamp,
        count: envelope.count,
    })
}

#[allow(clippy::too_many_arguments)]
pub(crate) async fn fetch_history(
    client: &TfClient,
    limit: u32,
    offset: u32,
    source: Option<&str>,
    freshness: Duration,
    cache_mode: CacheMode,
    retry_cfg: &RetryConfig,
) -> Result<NewsPage, TfError> {
    if limit == 0 {
        return Err(TfError::InvalidParams("news page limit must be positive".into()));
    }

    let key = CacheKey::new("news/history")
        .param("limit", limit)
        .param("offset", offset)
        .opt_param("source", source)
        .build();

    let mut req = ApiRequest::get(PATH_NEWS_HISTORY, key, "failed to retrieve the news history")
        .param("limit", limit)
        .param("offset", offset)
        .freshness(freshness)
        .cache_mode(cache_mode);
    if let Some(src) = source {
        req = req.param("source", src);
    }

    let envelope: HistoryEnvelope =
        retry::run(retry_cfg, "news_history", || net::get_json(client, &req)).await?;

    check_count("news_history", envelope.count, envelope.articles.len());

    Ok(NewsPage {
        articles: envelope.articles.into_iter().map(map_article).collect(),
        count: envelope.count,
        total: envelope.total,
        limit: envelope.limit,
        offset: envelope.offset,
    })
}

fn check_count(what: &str, reported: u32, received: usize) {
    if reported as usize != received {
        tracing::warn!(what, reported, received, "article count does not match payload");
    }
}

fn map_article(n: ArticleNode) -> NewsArticle {
    NewsArticle {
        id: n.id,
        source: n.source,
        title: n.title,
        description: n.description.unwrap_or_default(),
        url: n.url,
        image_url: n.image_url.filter(|u| !u.is_empty()),
        published_at: n.published_at,
        created_at: n.created_at,
    }
}

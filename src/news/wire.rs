use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::wire::{de_opt_timestamp, de_timestamp};

#[derive(Deserialize)]
pub(crate) struct LatestEnvelope {
    #[serde(default)]
    pub(crate) articles: Vec<ArticleNode>,
    #[serde(deserialize_with = "de_timestamp")]
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) count: u32,
}

#[derive(Deserialize)]
pub(crate) struct HistoryEnvelope {
    #[serde(default)]
    pub(crate) articles: Vec<ArticleNode>,
    pub(crate) count: u32,
    pub(crate) total: u32,
    pub(crate) limit: u32,
    pub(crate) offset: u32,
}

#[derive(Deserialize)]
pub(crate) struct ArticleNode {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    pub(crate) source: String,
    pub(crate) title: String,
    // some feeds publish headlines without a summary
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) image_url: Option<String>,
    #[serde(deserialize_with = "de_timestamp")]
    pub(crate) published_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub(crate) created_at: Option<DateTime<Utc>>,
}

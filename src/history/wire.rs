use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::wire::{de_opt_timestamp, de_timestamp};

#[derive(Deserialize)]
pub(crate) struct HistoricalEnvelope {
    pub(crate) symbol: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub(crate) from: DateTime<Utc>,
    #[serde(deserialize_with = "de_timestamp")]
    pub(crate) to: DateTime<Utc>,
    pub(crate) count: u32,
    #[serde(default)]
    pub(crate) data: Vec<PointNode>,
}

#[derive(Deserialize)]
pub(crate) struct PointNode {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    pub(crate) symbol: String,
    pub(crate) current_price: f64,
    pub(crate) change: f64,
    pub(crate) percent_change: f64,
    pub(crate) high: f64,
    pub(crate) low: f64,
    pub(crate) open: f64,
    pub(crate) previous_close: f64,
    #[serde(deserialize_with = "de_timestamp")]
    pub(crate) timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub(crate) created_at: Option<DateTime<Utc>>,
}

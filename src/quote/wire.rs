use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::wire::de_timestamp;

#[derive(Deserialize)]
pub(crate) struct QuotesEnvelope {
    pub(crate) quotes: BTreeMap<String, QuoteNode>,
    #[serde(deserialize_with = "de_timestamp")]
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) count: u32,
}

/// Finnhub-style quote with single-letter field names.
#[derive(Deserialize)]
pub(crate) struct QuoteNode {
    pub(crate) c: f64,
    pub(crate) d: f64,
    pub(crate) dp: f64,
    pub(crate) h: f64,
    pub(crate) l: f64,
    pub(crate) o: f64,
    pub(crate) pc: f64,
    pub(crate) t: i64,
}

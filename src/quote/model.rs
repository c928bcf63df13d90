use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The latest quote for one tracked symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    /// Last traded price (`c`).
    pub current_price: f64,
    /// Absolute change against the previous close (`d`).
    pub change: f64,
    /// Percent change against the previous close (`dp`).
    pub percent_change: f64,
    /// Day high (`h`).
    pub high: f64,
    /// Day low (`l`).
    pub low: f64,
    /// Day open (`o`).
    pub open: f64,
    /// Previous session close (`pc`).
    pub previous_close: f64,
    /// Unix seconds of the observation (`t`).
    pub timestamp: i64,
}

impl Quote {
    /// `true` when the price is at or above the previous close.
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// A complete set of current quotes, replaced as a whole on every poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSnapshot {
    /// One entry per tracked symbol.
    pub quotes: BTreeMap<String, Quote>,
    /// When the backend produced the snapshot.
    pub timestamp: DateTime<Utc>,
    /// Number of quotes the backend reported.
    pub count: u32,
}

impl QuoteSnapshot {
    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

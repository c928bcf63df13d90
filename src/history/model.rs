use chrono::{DateTime, Utc};
use serde::Serialize;

/// One stored quote observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalPoint {
    pub id: Option<i64>,
    pub symbol: String,
    pub current_price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub previous_close: f64,
    /// When the quote was observed upstream.
    pub timestamp: DateTime<Utc>,
    /// When the backend stored the row.
    pub created_at: Option<DateTime<Utc>>,
}

/// A bounded time series for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalData {
    pub symbol: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub count: u32,
    /// Points in the order the backend returned them.
    pub data: Vec<HistoricalPoint>,
}

impl HistoricalData {
    /// Observed prices in series order.
    pub fn prices(&self) -> Vec<f64> {
        self.data.iter().map(|p| p.current_price).collect()
    }

    pub fn first(&self) -> Option<&HistoricalPoint> {
        self.data.first()
    }

    pub fn last(&self) -> Option<&HistoricalPoint> {
        self.data.last()
    }
}

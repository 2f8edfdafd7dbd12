// =============================================================================
// Shared types used across the Marketscope dashboard server
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data for a single symbol.
///
/// Rows are ordered by date ascending and unique per date. Once fetched for a
/// request the sequence is never mutated; every indicator series is computed
/// against it index-for-index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Trading day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceRow {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Convenience slice accessor: closing prices in row order.
    pub fn closes(rows: &[PriceRow]) -> Vec<f64> {
        rows.iter().map(|r| r.close).collect()
    }
}

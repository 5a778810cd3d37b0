use serde::Serialize;

use crate::normalize::units;

/// Maximum records in one batch, matching the upstream top-20 ranking.
pub const MAX_BATCH: usize = 20;

/// One row of the trending ranking, produced fresh on every fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingRecord {
    pub rank: u32,
    pub ticker: String,
    pub messages: String,
    pub change: String,
    pub since: String,
    pub captured_at: String,
}

/// One fetch cycle's full ordered ranking, rank ascending.
/// Consumed immediately by the display layer and discarded; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingBatch {
    pub source: String,
    pub records: Vec<TrendingRecord>,
}

impl TrendingBatch {
    pub fn new(source: &str, records: Vec<TrendingRecord>) -> Self {
        Self {
            source: source.to_string(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (ticker, unit-normalized message volume) pairs for charting.
    /// The numeric value never appears in the display fields.
    pub fn volume_series(&self) -> Vec<(String, f64)> {
        self.records
            .iter()
            .map(|r| (r.ticker.clone(), units::volume_value(&r.messages)))
            .collect()
    }

    pub fn tickers(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.ticker.as_str()).collect()
    }
}

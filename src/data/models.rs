use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Descriptor for a single ticker in the symbol directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
}

/// Ticker -> descriptor, iterated in ticker order
pub type SymbolDirectory = BTreeMap<String, SymbolInfo>;

/// Body of `GET /api/symbols`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolsResponse {
    pub symbols: SymbolDirectory,
}

/// One end-of-day price record. The provider sends these newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// ISO-8601 timestamp, e.g. `2024-01-02T00:00:00+0000`
    pub date: String,
    pub adj_open: f64,
    pub adj_close: f64,
    pub adj_low: f64,
    pub adj_high: f64,
}

impl PriceRecord {
    pub fn is_finite(&self) -> bool {
        [self.adj_open, self.adj_close, self.adj_low, self.adj_high]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Body of `GET /api/symbols/{ticker}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub name: String,
    pub prices: Vec<PriceRecord>,
    pub news: Vec<String>,
    /// Probability of an upward move, in [0, 1]
    pub prediction: f64,
}

/// Error body returned by the backend on 4xx, e.g. `{"message": "symbol not found"}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

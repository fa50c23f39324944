use serde::{Deserialize, Serialize};

use crate::data::models::PriceRecord;

/// Characters of an ISO-8601 timestamp that make up the calendar date
const DATE_LEN: usize = 10;

/// `[open, close, low, high]`, the candlestick value order
pub type Ohlc = [f64; 4];

/// Chart-ready price data, oldest first. `category_data` and `values` are parallel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub category_data: Vec<String>,
    pub values: Vec<Ohlc>,
}

/// Reverse newest-first provider records into oldest-first chart series.
pub fn build_chart_series(prices: &[PriceRecord]) -> ChartSeries {
    let mut series = ChartSeries {
        category_data: Vec::with_capacity(prices.len()),
        values: Vec::with_capacity(prices.len()),
    };
    for p in prices.iter().rev() {
        series.category_data.push(date_label(&p.date));
        series
            .values
            .push([p.adj_open, p.adj_close, p.adj_low, p.adj_high]);
    }
    series
}

/// First ten characters of the timestamp; shorter strings pass through whole.
pub fn date_label(date: &str) -> String {
    date.chars().take(DATE_LEN).collect()
}

/// Named view over one candlestick value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
}

impl Candle {
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    pub fn body_low(&self) -> f64 {
        self.open.min(self.close)
    }

    pub fn body_high(&self) -> f64 {
        self.open.max(self.close)
    }
}

impl From<Ohlc> for Candle {
    fn from(v: Ohlc) -> Self {
        let [open, close, low, high] = v;
        Self {
            open,
            close,
            low,
            high,
        }
    }
}

pub mod option;
pub mod series;

pub use option::{build_chart_config, ChartConfig};
pub use series::{build_chart_series, Candle, ChartSeries};

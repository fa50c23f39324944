use crate::chart::ChartConfig;
use crate::config;
use crate::data::api::FetchError;
use crate::data::models::SymbolDirectory;

/// Everything the dashboard renders. Replaced wholesale by `reducer::reduce`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub loading_symbols: bool,
    pub symbols: SymbolDirectory,
    pub symbols_error: Option<FetchError>,

    pub loading_data: bool,
    pub selected_symbol: Option<String>,
    /// Sequence number of the most recently issued series request (0 = none yet)
    pub latest_request: u64,
    pub chart_config: Option<ChartConfig>,
    pub news: Vec<String>,
    pub prediction: f64,
    pub series_error: Option<FetchError>,
    pub last_refresh: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading_symbols: true,
            symbols: SymbolDirectory::new(),
            symbols_error: None,
            loading_data: true,
            selected_symbol: None,
            latest_request: 0,
            chart_config: None,
            news: Vec::new(),
            prediction: config::PREDICTION_THRESHOLD,
            series_error: None,
            last_refresh: None,
        }
    }
}

impl ViewState {
    pub fn prediction_display(&self) -> PredictionDisplay {
        PredictionDisplay::from_score(self.prediction)
    }

    pub fn status_line(&self) -> String {
        if self.loading_symbols {
            return "Loading symbol directory...".to_string();
        }
        if let Some(err) = &self.symbols_error {
            return format!("Symbol directory unavailable ({})", err.kind());
        }
        let selected = self.selected_symbol.as_deref().unwrap_or("-");
        if self.loading_data {
            return format!("Loading {}...", selected);
        }
        if let Some(err) = &self.series_error {
            return format!("{}: {}", selected, err.kind());
        }
        format!(
            "{} symbols | {} | Last refresh: {}",
            self.symbols.len(),
            selected,
            self.last_refresh.as_deref().unwrap_or("N/A")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn glyph(self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
        }
    }

    /// Shares the candlestick palette
    pub fn color_hex(self) -> &'static str {
        match self {
            Direction::Up => config::UP_COLOR,
            Direction::Down => config::DOWN_COLOR,
        }
    }
}

/// Confidence and direction derived from a prediction score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionDisplay {
    pub percent: u32,
    pub direction: Direction,
}

impl PredictionDisplay {
    /// A score of exactly 0.5 reads as `Down`: only strictly greater is `Up`.
    pub fn from_score(p: f64) -> Self {
        let direction = if p > config::PREDICTION_THRESHOLD {
            Direction::Up
        } else {
            Direction::Down
        };
        Self {
            percent: display_percent(p),
            direction,
        }
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}

pub fn display_percent(p: f64) -> u32 {
    (p.max(1.0 - p) * 100.0).round() as u32
}

use std::time::Duration;

/// Ticker requested automatically once the symbol directory arrives
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Backend serving `/api/symbols` and `/api/symbols/{ticker}`
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_URL_ENV: &str = "STOCK_PULSE_API_URL";
pub const TIMEOUT_ENV: &str = "STOCK_PULSE_TIMEOUT_SECS";

/// Candlestick palette (fill / border)
pub const UP_COLOR: &str = "#00da3c";
pub const UP_BORDER_COLOR: &str = "#008F28";
pub const DOWN_COLOR: &str = "#ec0000";
pub const DOWN_BORDER_COLOR: &str = "#8A0000";

/// Initial visible window of the chart, percent of the full series
pub const ZOOM_START: f64 = 50.0;
pub const ZOOM_END: f64 = 100.0;

/// Scores strictly above this read as a predicted increase
pub const PREDICTION_THRESHOLD: f64 = 0.5;

pub const DEFAULT_CHART_HEIGHT: f32 = 408.0;

/// Runtime settings resolved from the environment (and `.env`, if present)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        if dotenv::dotenv().is_ok() {
            tracing::debug!("Loaded .env file");
        }
        Self::from_values(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn from_values(api_url: Option<String>, timeout: Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = match api_url.map(|s| s.trim().to_string()) {
            Some(url) if !url.is_empty() => url,
            _ => defaults.api_url,
        };

        let request_timeout = match timeout.as_deref().map(str::trim) {
            None => defaults.request_timeout,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        "Ignoring invalid {}={:?}, using {}s",
                        TIMEOUT_ENV,
                        raw,
                        DEFAULT_TIMEOUT_SECS
                    );
                    defaults.request_timeout
                }
            },
        };

        Self {
            api_url,
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let s = Settings::from_values(None, None);
        assert_eq!(s, Settings::default());
        assert_eq!(s.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_overrides_applied() {
        let s = Settings::from_values(
            Some(" http://example.test:8080 ".to_string()),
            Some("5".to_string()),
        );
        assert_eq!(s.api_url, "http://example.test:8080");
        assert_eq!(s.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        for raw in ["0", "-3", "soon", ""] {
            let s = Settings::from_values(None, Some(raw.to_string()));
            assert_eq!(s.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS), "{raw}");
        }
    }

    #[test]
    fn test_blank_url_falls_back() {
        let s = Settings::from_values(Some("   ".to_string()), None);
        assert_eq!(s.api_url, DEFAULT_API_URL);
    }
}

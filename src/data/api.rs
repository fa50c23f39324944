use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use thiserror::Error;

use crate::data::models::{ApiMessage, SeriesResponse, SymbolDirectory, SymbolsResponse};

const SYMBOLS_PATH: [&str; 2] = ["api", "symbols"];

/// Why a provider request did not produce usable data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Transport failure, timeout, or a non-success HTTP status
    #[error("request to {url} failed: {reason}")]
    FetchFailed {
        url: String,
        status: Option<u16>,
        reason: String,
    },
    /// The body arrived but is not the expected shape
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::FetchFailed { .. } => "fetch failed",
            FetchError::MalformedResponse { .. } => "malformed response",
        }
    }
}

/// Client for the symbol and series providers.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL '{}' cannot carry a path", base_url);
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, base_url })
    }

    /// Proxy-free client for tests that talk to a server on localhost.
    #[cfg(test)]
    pub fn for_local_tests(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        Self {
            http,
            base_url: Url::parse(base_url).unwrap(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn symbols_url(&self) -> Url {
        self.url_with_segments(&SYMBOLS_PATH)
    }

    /// The ticker is encoded as one path segment, so `BRK/B` cannot escape it.
    pub fn series_url(&self, ticker: &str) -> Url {
        self.url_with_segments(&[SYMBOLS_PATH[0], SYMBOLS_PATH[1], ticker])
    }

    fn url_with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET /api/symbols`
    pub async fn fetch_symbols(&self) -> Result<SymbolDirectory, FetchError> {
        let url = self.symbols_url();
        tracing::info!("Fetching symbol directory from {}", url);
        let body = self.get_bytes(&url).await?;
        let symbols = decode_symbols(url.as_str(), &body)?;
        tracing::info!("Symbol directory holds {} tickers", symbols.len());
        Ok(symbols)
    }

    /// `GET /api/symbols/{ticker}`
    pub async fn fetch_series(&self, ticker: &str) -> Result<SeriesResponse, FetchError> {
        let url = self.series_url(ticker);
        tracing::info!("Fetching series for {} from {}", ticker, url);
        let body = self.get_bytes(&url).await?;
        let series = decode_series(url.as_str(), &body)?;
        tracing::debug!(
            "{}: {} price records, {} headlines, prediction {:.3}",
            ticker,
            series.prices.len(),
            series.news.len(),
            series.prediction
        );
        Ok(series)
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let failed = |status: Option<StatusCode>, reason: String| FetchError::FetchFailed {
            url: url.to_string(),
            status: status.map(|s| s.as_u16()),
            reason,
        };

        let resp = self.http.get(url.clone()).send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "timed out".to_string()
            } else {
                e.to_string()
            };
            failed(None, reason)
        })?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| failed(Some(status), format!("failed to read body: {}", e)))?;

        if !status.is_success() {
            let reason = serde_json::from_slice::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            return Err(failed(Some(status), format!("HTTP {}: {}", status.as_u16(), reason)));
        }

        Ok(body.to_vec())
    }
}

/// Decode a `/api/symbols` body.
pub fn decode_symbols(url: &str, body: &[u8]) -> Result<SymbolDirectory, FetchError> {
    let resp: SymbolsResponse = serde_json::from_slice(body).map_err(|e| malformed(url, e))?;
    Ok(resp.symbols)
}

/// Decode and sanity-check a `/api/symbols/{ticker}` body.
pub fn decode_series(url: &str, body: &[u8]) -> Result<SeriesResponse, FetchError> {
    let series: SeriesResponse = serde_json::from_slice(body).map_err(|e| malformed(url, e))?;

    if !series.prediction.is_finite() || !(0.0..=1.0).contains(&series.prediction) {
        return Err(malformed(
            url,
            format!("prediction {} is outside [0, 1]", series.prediction),
        ));
    }

    if let Some((i, bad)) = series.prices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(malformed(
            url,
            format!("price record {} ({}) has a non-finite value", i, bad.date),
        ));
    }

    Ok(series)
}

fn malformed(url: &str, reason: impl ToString) -> FetchError {
    FetchError::MalformedResponse {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

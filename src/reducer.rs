use crate::chart::{build_chart_config, build_chart_series};
use crate::event::DashboardEvent;
use crate::state::ViewState;

/// Pure transition: `(state, event) -> state`. No I/O, no clocks.
pub fn reduce(state: ViewState, event: DashboardEvent) -> ViewState {
    match event {
        DashboardEvent::SymbolsLoadRequested => ViewState {
            loading_symbols: true,
            symbols_error: None,
            ..state
        },
        DashboardEvent::SymbolsLoaded { symbols } => ViewState {
            loading_symbols: false,
            symbols,
            symbols_error: None,
            ..state
        },
        DashboardEvent::SymbolsLoadFailed { error } => {
            // Nothing else will clear loading_data if no series was ever requested.
            let loading_data = state.loading_data && state.latest_request != 0;
            ViewState {
                loading_symbols: false,
                symbols_error: Some(error),
                loading_data,
                ..state
            }
        }

        DashboardEvent::SeriesLoadRequested { request_id, symbol } => {
            if request_id <= state.latest_request {
                return state;
            }
            ViewState {
                loading_data: true,
                selected_symbol: Some(symbol),
                latest_request: request_id,
                series_error: None,
                ..state
            }
        }
        DashboardEvent::SeriesLoaded {
            request_id,
            symbol,
            series,
            received_at,
        } => {
            if request_id != state.latest_request {
                return state;
            }
            let title = format!("{} ({})", series.name, symbol);
            let chart = build_chart_series(&series.prices);
            ViewState {
                loading_data: false,
                chart_config: Some(build_chart_config(&title, &chart)),
                news: series.news,
                prediction: series.prediction,
                series_error: None,
                last_refresh: Some(received_at),
                ..state
            }
        }
        DashboardEvent::SeriesLoadFailed {
            request_id, error, ..
        } => {
            if request_id != state.latest_request {
                return state;
            }
            ViewState {
                loading_data: false,
                series_error: Some(error),
                ..state
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::api::FetchError;
    use crate::data::models::{PriceRecord, SeriesResponse, SymbolDirectory, SymbolInfo};

    fn directory() -> SymbolDirectory {
        let mut dir = SymbolDirectory::new();
        dir.insert(
            "AAPL".to_string(),
            SymbolInfo {
                name: "Apple Inc.".to_string(),
                sector: Some("Information Technology".to_string()),
            },
        );
        dir
    }

    fn series(name: &str, prediction: f64) -> SeriesResponse {
        SeriesResponse {
            name: name.to_string(),
            prices: vec![
                PriceRecord {
                    date: "2024-01-02T00:00:00Z".to_string(),
                    adj_open: 10.0,
                    adj_close: 12.0,
                    adj_low: 9.0,
                    adj_high: 13.0,
                },
                PriceRecord {
                    date: "2024-01-01T00:00:00Z".to_string(),
                    adj_open: 8.0,
                    adj_close: 10.0,
                    adj_low: 7.0,
                    adj_high: 11.0,
                },
            ],
            news: vec!["Headline one".to_string(), "Headline two".to_string()],
            prediction,
        }
    }

    fn failure() -> FetchError {
        FetchError::FetchFailed {
            url: "http://127.0.0.1:5000/api/symbols/AAPL".to_string(),
            status: None,
            reason: "connection refused".to_string(),
        }
    }

    fn requested(state: ViewState, id: u64, symbol: &str) -> ViewState {
        reduce(
            state,
            DashboardEvent::SeriesLoadRequested {
                request_id: id,
                symbol: symbol.to_string(),
            },
        )
    }

    fn loaded(state: ViewState, id: u64, symbol: &str, s: SeriesResponse) -> ViewState {
        reduce(
            state,
            DashboardEvent::SeriesLoaded {
                request_id: id,
                symbol: symbol.to_string(),
                series: s,
                received_at: "2024-01-03 09:00:00".to_string(),
            },
        )
    }

    #[test]
    fn test_symbols_loaded_clears_only_symbol_flag() {
        let s = reduce(
            ViewState::default(),
            DashboardEvent::SymbolsLoaded {
                symbols: directory(),
            },
        );
        assert!(!s.loading_symbols);
        assert!(s.loading_data);
        assert_eq!(s.symbols["AAPL"].name, "Apple Inc.");
    }

    #[test]
    fn test_series_round_trip_builds_chart() {
        let s = reduce(
            ViewState::default(),
            DashboardEvent::SymbolsLoaded {
                symbols: directory(),
            },
        );
        let s = requested(s, 1, "AAPL");
        assert!(s.loading_data);
        assert_eq!(s.selected_symbol.as_deref(), Some("AAPL"));

        let s = loaded(s, 1, "AAPL", series("Apple Inc.", 0.73));
        assert!(!s.loading_data);
        let cfg = s.chart_config.as_ref().unwrap();
        assert_eq!(cfg.title_text(), "Apple Inc. (AAPL)");
        assert_eq!(cfg.labels(), ["2024-01-01", "2024-01-02"]);
        assert_eq!(cfg.candles(), [[8.0, 10.0, 7.0, 11.0], [10.0, 12.0, 9.0, 13.0]]);
        assert_eq!(s.news, vec!["Headline one", "Headline two"]);
        assert_eq!(s.prediction, 0.73);
        assert_eq!(s.last_refresh.as_deref(), Some("2024-01-03 09:00:00"));
    }

    #[test]
    fn test_late_response_from_older_request_discarded() {
        let s = requested(ViewState::default(), 1, "AAPL");
        let s = requested(s, 2, "MSFT");

        // B resolves first, then A's stale answer arrives.
        let s = loaded(s, 2, "MSFT", series("Microsoft Corporation", 0.6));
        let after_b = s.clone();
        let s = loaded(s, 1, "AAPL", series("Apple Inc.", 0.1));

        assert_eq!(s, after_b);
        assert_eq!(
            s.chart_config.as_ref().unwrap().title_text(),
            "Microsoft Corporation (MSFT)"
        );
    }

    #[test]
    fn test_stale_result_does_not_end_newer_loading() {
        let s = requested(ViewState::default(), 1, "AAPL");
        let s = requested(s, 2, "MSFT");
        let s = loaded(s, 1, "AAPL", series("Apple Inc.", 0.1));
        assert!(s.loading_data);
        assert!(s.chart_config.is_none());

        let s = reduce(
            s,
            DashboardEvent::SeriesLoadFailed {
                request_id: 1,
                symbol: "AAPL".to_string(),
                error: failure(),
            },
        );
        assert!(s.loading_data);
        assert!(s.series_error.is_none());
    }

    #[test]
    fn test_out_of_order_request_ignored() {
        let s = requested(ViewState::default(), 3, "MSFT");
        let s = requested(s, 2, "AAPL");
        assert_eq!(s.latest_request, 3);
        assert_eq!(s.selected_symbol.as_deref(), Some("MSFT"));
    }

    #[test]
    fn test_series_failure_clears_loading() {
        let s = loaded(requested(ViewState::default(), 1, "AAPL"), 1, "AAPL", series("Apple Inc.", 0.7));
        let s = requested(s, 2, "ZZZZ");
        let s = reduce(
            s,
            DashboardEvent::SeriesLoadFailed {
                request_id: 2,
                symbol: "ZZZZ".to_string(),
                error: failure(),
            },
        );
        assert!(!s.loading_data);
        assert_eq!(s.series_error, Some(failure()));
        // previous data is retained underneath the error
        assert!(s.chart_config.is_some());

        // a new request clears the error again
        let s = requested(s, 3, "AAPL");
        assert!(s.series_error.is_none());
    }

    #[test]
    fn test_symbols_failure_never_leaves_loading() {
        let s = reduce(
            ViewState::default(),
            DashboardEvent::SymbolsLoadFailed { error: failure() },
        );
        assert!(!s.loading_symbols);
        assert!(!s.loading_data);
        assert!(s.symbols_error.is_some());

        let s = reduce(s, DashboardEvent::SymbolsLoadRequested);
        assert!(s.loading_symbols);
        assert!(s.symbols_error.is_none());
    }

    #[test]
    fn test_symbols_failure_keeps_inflight_series_loading() {
        let s = requested(ViewState::default(), 1, "AAPL");
        let s = reduce(s, DashboardEvent::SymbolsLoadFailed { error: failure() });
        assert!(s.loading_data);
    }

    #[test]
    fn test_empty_price_list_renders_empty_chart() {
        let mut empty = series("Apple Inc.", 0.5);
        empty.prices.clear();
        let s = loaded(requested(ViewState::default(), 1, "AAPL"), 1, "AAPL", empty);
        assert!(!s.loading_data);
        let cfg = s.chart_config.unwrap();
        assert!(cfg.candles().is_empty());
        assert!(cfg.labels().is_empty());
    }
}

use crate::data::api::FetchError;
use crate::data::models::{SeriesResponse, SymbolDirectory};

#[derive(Debug, Clone)]
pub enum DashboardEvent {
    SymbolsLoadRequested,
    SymbolsLoaded {
        symbols: SymbolDirectory,
    },
    SymbolsLoadFailed {
        error: FetchError,
    },

    SeriesLoadRequested {
        request_id: u64,
        symbol: String,
    },
    SeriesLoaded {
        request_id: u64,
        symbol: String,
        series: SeriesResponse,
        received_at: String,
    },
    SeriesLoadFailed {
        request_id: u64,
        symbol: String,
        error: FetchError,
    },
}

impl DashboardEvent {
    /// Sequence number carried by series events
    pub fn request_id(&self) -> Option<u64> {
        match self {
            DashboardEvent::SeriesLoadRequested { request_id, .. }
            | DashboardEvent::SeriesLoaded { request_id, .. }
            | DashboardEvent::SeriesLoadFailed { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    pub fn is_series_completion(&self) -> bool {
        matches!(
            self,
            DashboardEvent::SeriesLoaded { .. } | DashboardEvent::SeriesLoadFailed { .. }
        )
    }
}

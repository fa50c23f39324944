use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::{Context, Result};
use eframe::egui;

use crate::config;
use crate::data::api::ApiClient;
use crate::event::DashboardEvent;
use crate::reducer::reduce;
use crate::state::ViewState;
use crate::ui;
use crate::ui::dashboard::DashboardView;
use crate::ui::search_bar::SearchAction;

/// Dashboard controller: owns the view state, issues fetches, applies their results.
pub struct StockPulseApp {
    pub state: ViewState,
    view: DashboardView,
    api: ApiClient,
    tokio_rt: tokio::runtime::Runtime,
    events_tx: Sender<DashboardEvent>,
    events_rx: Receiver<DashboardEvent>,
    egui_ctx: egui::Context,
    next_request_id: u64,
}

impl StockPulseApp {
    pub fn new(egui_ctx: egui::Context, api: ApiClient) -> Result<Self> {
        let tokio_rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let (events_tx, events_rx) = mpsc::channel();
        let mut app = Self {
            state: ViewState::default(),
            view: DashboardView::default(),
            api,
            tokio_rt,
            events_tx,
            events_rx,
            egui_ctx,
            next_request_id: 0,
        };
        app.initialize();
        Ok(app)
    }

    /// Kick off the symbol directory fetch; the default ticker follows once it lands.
    pub fn initialize(&mut self) {
        tracing::info!("Dashboard starting against {}", self.api.base_url());
        self.load_symbols();
    }

    pub fn reload_symbols(&mut self) {
        tracing::info!("Reloading symbol directory on request");
        self.load_symbols();
    }

    fn load_symbols(&mut self) {
        self.dispatch(DashboardEvent::SymbolsLoadRequested);

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let ctx = self.egui_ctx.clone();
        self.tokio_rt.spawn(async move {
            let event = match api.fetch_symbols().await {
                Ok(symbols) => DashboardEvent::SymbolsLoaded { symbols },
                Err(error) => {
                    tracing::warn!("Symbol directory fetch failed: {}", error);
                    DashboardEvent::SymbolsLoadFailed { error }
                }
            };
            send_event(&tx, &ctx, event);
        });
    }

    /// Request series data for `symbol`. Unknown tickers are passed through as-is.
    pub fn select_symbol(&mut self, symbol: &str) {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        tracing::info!("Selecting {} (request #{})", symbol, request_id);

        self.dispatch(DashboardEvent::SeriesLoadRequested {
            request_id,
            symbol: symbol.to_string(),
        });

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let ctx = self.egui_ctx.clone();
        let symbol = symbol.to_string();
        self.tokio_rt.spawn(async move {
            let event = match api.fetch_series(&symbol).await {
                Ok(series) => DashboardEvent::SeriesLoaded {
                    request_id,
                    symbol,
                    series,
                    received_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                },
                Err(error) => {
                    tracing::warn!("Series fetch for {} failed: {}", symbol, error);
                    DashboardEvent::SeriesLoadFailed {
                        request_id,
                        symbol,
                        error,
                    }
                }
            };
            send_event(&tx, &ctx, event);
        });
    }

    /// Apply every completed fetch queued since the last frame.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: DashboardEvent) {
        if event.is_series_completion() && event.request_id() != Some(self.state.latest_request) {
            tracing::debug!(
                "Discarding stale series response #{:?} (latest is #{})",
                event.request_id(),
                self.state.latest_request
            );
        }

        let symbols_arrived = matches!(event, DashboardEvent::SymbolsLoaded { .. });
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);

        if symbols_arrived && self.state.latest_request == 0 {
            self.select_symbol(config::DEFAULT_SYMBOL);
        }
    }
}

fn send_event(tx: &Sender<DashboardEvent>, ctx: &egui::Context, event: DashboardEvent) {
    if tx.send(event).is_err() {
        tracing::debug!("Dashboard closed; dropping fetch result");
        return;
    }
    ctx.request_repaint();
}

impl eframe::App for StockPulseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        if self.state.loading_symbols || self.state.loading_data {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.state.status_line());
            });
        });

        let mut action = SearchAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink(false)
                .show(ui, |ui| {
                    action = ui::dashboard::render(ui, &self.state, &mut self.view);
                });
        });

        match action {
            SearchAction::Select(symbol) => self.select_symbol(&symbol),
            SearchAction::ReloadSymbols => self.reload_symbols(),
            SearchAction::None => {}
        }
    }
}

mod app;
mod chart;
mod config;
mod data;
mod event;
mod reducer;
mod state;
mod ui;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use app::StockPulseApp;
use data::api::ApiClient;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = config::Settings::from_env();
    tracing::info!(
        "Backend {} (request timeout {:?})",
        settings.api_url,
        settings.request_timeout
    );
    let api = ApiClient::new(&settings.api_url, settings.request_timeout)
        .with_context(|| format!("Invalid backend URL {}", settings.api_url))?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stock Pulse",
        options,
        Box::new(move |cc| Ok(Box::new(StockPulseApp::new(cc.egui_ctx.clone(), api)?))),
    )
    .map_err(|e| anyhow::anyhow!("eframe exited with an error: {e}"))
}

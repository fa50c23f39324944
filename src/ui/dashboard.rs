use eframe::egui;

use crate::state::ViewState;
use crate::ui::chart_panel::{self, ChartView};
use crate::ui::search_bar::{self, SearchAction};
use crate::ui::{news_panel, prediction_panel};

/// Share of the middle row given to the chart; the prediction card takes the rest
const CHART_SHARE: f32 = 0.75;

/// UI-only state that never goes through the reducer
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub query: String,
    pub chart: ChartView,
}

/// Search row, then chart + prediction, then news.
pub fn render(ui: &mut egui::Ui, state: &ViewState, view: &mut DashboardView) -> SearchAction {
    let action = search_bar::render(ui, state, &mut view.query);

    ui.add_space(8.0);

    let row_width = ui.available_width();
    let chart_width = (row_width * CHART_SHARE - 8.0).max(320.0);
    let side_height = view.chart.height;
    ui.horizontal_top(|ui| {
        ui.allocate_ui_with_layout(
            egui::vec2(chart_width, 0.0),
            egui::Layout::top_down(egui::Align::Min),
            |ui| chart_panel::render(ui, state, &mut view.chart),
        );
        ui.allocate_ui_with_layout(
            egui::vec2(ui.available_width(), 0.0),
            egui::Layout::top_down(egui::Align::Min),
            |ui| prediction_panel::render(ui, state, side_height),
        );
    });

    ui.add_space(8.0);
    news_panel::render(ui, state);

    action
}

use eframe::egui;

use crate::state::ViewState;
use crate::ui::chart_utils::{card, hex_color_or_grey};

pub fn render(ui: &mut egui::Ui, state: &ViewState, height: f32) {
    let error = state.series_error.as_ref().map(|e| e.kind().to_string());

    card(ui, Some("Prediction"), state.loading_data, error.as_deref(), |ui| {
        let display = state.prediction_display();
        let color = hex_color_or_grey(display.direction.color_hex());

        ui.set_min_height(height);
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(egui::RichText::new(display.label()).size(50.0).color(color).strong());
            ui.label(egui::RichText::new(display.direction.glyph()).size(80.0).color(color));
            ui.weak(format!("score {:.4}", state.prediction));
        });
    });
}

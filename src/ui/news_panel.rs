use eframe::egui;

use crate::state::ViewState;
use crate::ui::chart_utils::card;

const BULLET_COLOR: egui::Color32 = egui::Color32::from_rgb(24, 144, 255);

pub fn render(ui: &mut egui::Ui, state: &ViewState) {
    let error = state
        .series_error
        .as_ref()
        .map(|e| format!("News unavailable: {}", e.kind()));

    card(ui, Some("Latest News"), state.loading_data, error.as_deref(), |ui| {
        if state.news.is_empty() {
            ui.weak("No headlines.");
            return;
        }
        // Headlines can repeat; key rows by position, not text.
        for (i, title) in state.news.iter().enumerate() {
            ui.push_id(i, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(BULLET_COLOR, "●");
                    ui.label(title);
                });
            });
            ui.add_space(4.0);
        }
    });
}

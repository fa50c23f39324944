//! Shared helpers for the dashboard panels.

use eframe::egui;

/// Inline height-adjustment drag control placed immediately above a chart.
pub fn height_control(ui: &mut egui::Ui, height: &mut f32, label: &str) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(80, 120, 200, 18))
        .inner_margin(egui::Margin::symmetric(8.0, 3.0))
        .rounding(egui::Rounding::same(4.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(100, 160, 255), "⇕");
                ui.colored_label(egui::Color32::from_gray(170), label);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::DragValue::new(height)
                            .speed(2.0)
                            .range(160.0..=900.0)
                            .suffix(" px"),
                    );
                    ui.colored_label(egui::Color32::from_gray(130), "drag to resize ·");
                });
            });
        });
    ui.add_space(2.0);
}

/// Titled card around a data panel, with the shared loading / error treatment.
/// `add_contents` only runs when the panel is neither loading nor failed.
pub fn card<R>(
    ui: &mut egui::Ui,
    title: Option<&str>,
    loading: bool,
    error: Option<&str>,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> Option<R> {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            if let Some(title) = title {
                ui.strong(title);
                ui.separator();
            }
            if loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
                return None;
            }
            if let Some(err) = error {
                ui.colored_label(egui::Color32::from_rgb(220, 50, 50), err);
                return None;
            }
            Some(add_contents(ui))
        })
        .inner
}

/// Parse `#rrggbb` (case-insensitive) into a colour.
pub fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(egui::Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Like `parse_hex_color`, falling back to mid grey for anything unparseable.
pub fn hex_color_or_grey(hex: &str) -> egui::Color32 {
    parse_hex_color(hex).unwrap_or_else(|| {
        tracing::warn!("Unparseable colour {:?}, using grey", hex);
        egui::Color32::GRAY
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_palette_colours() {
        assert_eq!(
            parse_hex_color("#00da3c"),
            Some(egui::Color32::from_rgb(0x00, 0xda, 0x3c))
        );
        assert_eq!(
            parse_hex_color("#8A0000"),
            Some(egui::Color32::from_rgb(0x8a, 0x00, 0x00))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["00da3c", "#00da3", "#00da3cff", "#zzzzzz", "", "#ééé"] {
            assert_eq!(parse_hex_color(bad), None, "{bad}");
        }
        assert_eq!(hex_color_or_grey("red"), egui::Color32::GRAY);
    }
}

use std::ops::Range;

use eframe::egui;
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Plot};

use crate::chart::{Candle, ChartConfig};
use crate::config;
use crate::state::ViewState;
use crate::ui::chart_utils::{card, height_control, hex_color_or_grey};

/// Narrowest window the wheel or sliders can reach, percent
const MIN_SPAN: f64 = 1.0;
/// Wheel points per doubling / halving of the visible span
const WHEEL_SENSITIVITY: f64 = 400.0;

/// Visible slice of the category axis, percent of the full series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomWindow {
    pub start: f64,
    pub end: f64,
}

impl Default for ZoomWindow {
    fn default() -> Self {
        Self {
            start: config::ZOOM_START,
            end: config::ZOOM_END,
        }
    }
}

impl ZoomWindow {
    pub fn new(start: f64, end: f64) -> Self {
        let mut w = Self { start, end };
        w.normalize();
        w
    }

    /// Clamp to 0..=100 and keep at least `MIN_SPAN` between the ends.
    pub fn normalize(&mut self) {
        self.start = self.start.clamp(0.0, 100.0 - MIN_SPAN);
        self.end = self.end.clamp(self.start + MIN_SPAN, 100.0);
    }

    /// Index range of the candles inside the window; never empty unless `n == 0`.
    pub fn visible_range(&self, n: usize) -> Range<usize> {
        if n == 0 {
            return 0..0;
        }
        let nf = n as f64;
        let mut lo = (nf * self.start / 100.0).floor() as usize;
        let mut hi = ((nf * self.end / 100.0).ceil() as usize).min(n);
        if hi <= lo {
            hi = (lo + 1).min(n);
            lo = hi - 1;
        }
        lo..hi
    }

    /// Scale the span around the right edge. `factor < 1` zooms in.
    pub fn zoom_by(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let span = ((self.end - self.start) * factor).clamp(MIN_SPAN, 100.0);
        self.start = self.end - span;
        if self.start < 0.0 {
            self.start = 0.0;
            self.end = span;
        }
        self.normalize();
    }
}

/// Per-session view options for the chart panel
#[derive(Debug, Clone)]
pub struct ChartView {
    pub height: f32,
    pub window: ZoomWindow,
    /// Request id of the chart the window belongs to
    shown_request: u64,
}

impl Default for ChartView {
    fn default() -> Self {
        Self {
            height: config::DEFAULT_CHART_HEIGHT,
            window: ZoomWindow::default(),
            shown_request: 0,
        }
    }
}

impl ChartView {
    /// Reset the window to the config's dataZoom whenever a new chart arrives.
    pub fn sync(&mut self, request_id: u64, chart: &ChartConfig) {
        if self.shown_request != request_id {
            let (start, end) = chart.initial_window();
            self.window = ZoomWindow::new(start, end);
            self.shown_request = request_id;
        }
    }
}

pub fn render(ui: &mut egui::Ui, state: &ViewState, view: &mut ChartView) {
    let error = state
        .series_error
        .as_ref()
        .map(|e| format!("Chart unavailable: {}", e));

    card(ui, None, state.loading_data, error.as_deref(), |ui| {
        match &state.chart_config {
            Some(chart) => {
                view.sync(state.latest_request, chart);
                draw_chart(ui, chart, view);
            }
            None => {
                ui.set_min_height(view.height);
                ui.label("Select a symbol to load its chart.");
            }
        }
    });
}

fn draw_chart(ui: &mut egui::Ui, chart: &ChartConfig, view: &mut ChartView) {
    ui.horizontal(|ui| {
        ui.heading(chart.title_text());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button("Copy chart JSON")
                .on_hover_text("Copy the chart option object to the clipboard")
                .clicked()
            {
                match chart.to_json_pretty() {
                    Ok(json) => ui.ctx().copy_text(json),
                    Err(e) => tracing::warn!("Failed to serialize chart config: {}", e),
                }
            }
        });
    });

    height_control(ui, &mut view.height, "Chart Height");

    let candles = chart.candles();
    let labels = chart.labels();
    let range = view.window.visible_range(candles.len());

    let style = chart.item_style();
    let up_fill = hex_color_or_grey(&style.color);
    let up_border = hex_color_or_grey(&style.border_color);
    let down_fill = hex_color_or_grey(&style.color0);
    let down_border = hex_color_or_grey(&style.border_color0);

    let elems: Vec<BoxElem> = range
        .clone()
        .map(|i| {
            let c = Candle::from(candles[i]);
            let (fill, border) = if c.is_up() {
                (up_fill, up_border)
            } else {
                (down_fill, down_border)
            };
            let label = labels.get(i).map(String::as_str).unwrap_or("");
            BoxElem::new(i as f64, BoxSpread::new(c.low, c.body_low(), c.close, c.body_high(), c.high))
                .name(format!(
                    "{}\nO {:.2}  C {:.2}\nL {:.2}  H {:.2}",
                    label, c.open, c.close, c.low, c.high
                ))
                .fill(fill)
                .stroke(egui::Stroke::new(1.0, border))
                .box_width(0.7)
                .whisker_width(0.0)
        })
        .collect();

    let axis_labels = labels.to_vec();
    let plot = Plot::new("price_candles")
        .height(view.height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .y_axis_label("Price")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                return String::new();
            }
            axis_labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.box_plot(
                BoxPlot::new(elems)
                    .element_formatter(Box::new(|elem: &BoxElem, _plot: &BoxPlot| elem.name.clone())),
            );
        });

    // "inside" zoom: mouse wheel over the plot
    if plot.response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y) as f64;
        if scroll != 0.0 {
            view.window.zoom_by(2f64.powf(-scroll / WHEEL_SENSITIVITY));
        }
    }

    // "slider" zoom
    ui.horizontal(|ui| {
        ui.label("Window:");
        let start = ui.add(
            egui::Slider::new(&mut view.window.start, 0.0..=100.0)
                .suffix("%")
                .fixed_decimals(0),
        );
        let end = ui.add(
            egui::Slider::new(&mut view.window.end, 0.0..=100.0)
                .suffix("%")
                .fixed_decimals(0),
        );
        if start.changed() || end.changed() {
            view.window.normalize();
        }
        if !range.is_empty() {
            let first = labels.get(range.start).map(String::as_str).unwrap_or("?");
            let last = labels.get(range.end - 1).map(String::as_str).unwrap_or("?");
            ui.weak(format!("{} → {} ({} of {} sessions)", first, last, range.len(), candles.len()));
        } else {
            ui.weak("No price data");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_chart_config, ChartSeries};

    #[test]
    fn test_default_window_is_recent_half() {
        let w = ZoomWindow::default();
        assert_eq!(w.visible_range(10), 5..10);
        assert_eq!(w.visible_range(2), 1..2);
        assert_eq!(w.visible_range(7), 3..7);
    }

    #[test]
    fn test_visible_range_never_empty() {
        let w = ZoomWindow::new(99.5, 100.0);
        assert_eq!(w.visible_range(1), 0..1);
        assert_eq!(w.visible_range(0), 0..0);

        let w = ZoomWindow::new(0.0, 1.0);
        assert_eq!(w.visible_range(3), 0..1);
    }

    #[test]
    fn test_normalize_orders_ends() {
        let w = ZoomWindow::new(80.0, 20.0);
        assert_eq!(w.start, 80.0);
        assert_eq!(w.end, 81.0);

        let w = ZoomWindow::new(-5.0, 150.0);
        assert_eq!((w.start, w.end), (0.0, 100.0));
    }

    #[test]
    fn test_zoom_keeps_right_edge() {
        let mut w = ZoomWindow::default();
        w.zoom_by(0.5);
        assert_eq!((w.start, w.end), (75.0, 100.0));

        w.zoom_by(10.0);
        assert_eq!((w.start, w.end), (0.0, 100.0));

        w.zoom_by(f64::NAN);
        assert_eq!((w.start, w.end), (0.0, 100.0));
    }

    #[test]
    fn test_zoom_out_from_left_edge() {
        let mut w = ZoomWindow::new(0.0, 20.0);
        w.zoom_by(2.0);
        assert_eq!((w.start, w.end), (0.0, 40.0));
    }

    #[test]
    fn test_new_chart_resets_window() {
        let chart = build_chart_config("X", &ChartSeries::default());
        let mut view = ChartView::default();
        view.window = ZoomWindow::new(10.0, 20.0);

        view.sync(1, &chart);
        assert_eq!(view.window, ZoomWindow::new(50.0, 100.0));

        view.window = ZoomWindow::new(10.0, 20.0);
        view.sync(1, &chart);
        assert_eq!(view.window, ZoomWindow::new(10.0, 20.0));
    }
}

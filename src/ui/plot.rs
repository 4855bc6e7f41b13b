use eframe::egui::Ui;
use egui_plot::{Line, Plot, PlotPoints};

use super::format::{format_money, format_si, timestamp_to_x, x_to_timestamp};
use crate::color::ACCENT;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Portfolio value chart
// ---------------------------------------------------------------------------

/// Render the summed portfolio value over time.
pub fn value_plot(ui: &mut Ui, state: &AppState, height: f32) {
    ui.heading("Portfolio Value");

    if state.view.series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Nothing selected.");
        });
        return;
    }

    let points: PlotPoints = state
        .view
        .series
        .iter()
        .map(|p| [timestamp_to_x(&p.timestamp), p.usd_value])
        .collect();

    Plot::new("portfolio_value")
        .height(height)
        .x_axis_label("Datetime")
        .y_axis_label("USD")
        .x_axis_formatter(|mark, _range| {
            x_to_timestamp(mark.value)
                .map(|ts| ts.format("%d%b").to_string())
                .unwrap_or_default()
        })
        .y_axis_formatter(|mark, _range| format_si(mark.value))
        .label_formatter(|_name, point| match x_to_timestamp(point.x) {
            Some(ts) => format!(
                "Date: {}\nUSD Value: {}",
                ts.format("%d %b %Y %H:%M"),
                format_money(point.y, 0)
            ),
            None => String::new(),
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Portfolio Value")
                    .color(ACCENT)
                    .width(4.0),
            );
        });
}

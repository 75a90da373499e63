//! Statistics panel UI rendering
//!
//! Shown once playback completes: averages, completion order and the
//! per-process table.

use eframe::egui;
use egui::{RichText, ScrollArea};
use rsched::scene::{format_number, StatisticsView, DETAIL_COLUMNS};
use rsched::ThemeColors;

pub fn render_statistics_panel(ui: &mut egui::Ui, view: &StatisticsView, theme_colors: &ThemeColors) {
    ui.label(RichText::new("Simulation Results").heading().strong());
    ui.separator();

    ui.horizontal_wrapped(|ui| {
        for (label, value) in &view.averages {
            ui.label(RichText::new(format!("{}:", label)).color(theme_colors.text_dim));
            ui.label(RichText::new(value).strong());
            ui.add_space(12.0);
        }
    });
    ui.label(RichText::new(view.completion_order_label()).color(theme_colors.accent));
    ui.add_space(6.0);

    ScrollArea::vertical()
        .id_salt("statistics_scroll_area")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("process_details")
                .num_columns(DETAIL_COLUMNS.len())
                .striped(true)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    for column in DETAIL_COLUMNS {
                        ui.label(RichText::new(column).strong());
                    }
                    ui.end_row();

                    for row in &view.rows {
                        let mut first = true;
                        for cell in &row.cells {
                            let response = ui.label(cell);
                            if first {
                                first = false;
                                if let Some(hover) = row_details(row) {
                                    response.on_hover_text(hover);
                                }
                            }
                        }
                        ui.end_row();
                    }
                });
        });
}

fn row_details(row: &rsched::scene::DetailRow) -> Option<String> {
    let parts: Vec<String> = [
        ("Arrival", row.arrival_time),
        ("Burst", row.burst_time),
        ("Response", row.response_time),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.map(|v| format!("{}: {}", name, format_number(v))))
    .collect();

    (!parts.is_empty()).then(|| parts.join("\n"))
}

//! Process configuration panel
//!
//! Editable process rows, the scheduling policy, server settings and the
//! button that submits everything for simulation.

use eframe::egui;
use egui::{DragValue, RichText};
use rsched::{process_label, SchedulingPolicy};
use crate::app::AppState;
use crate::state::{MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};

const MAX_TIME_VALUE: u32 = 1000;
const MAX_PRIORITY: u32 = 100;

/// Result of user interaction with the config panel
pub enum ConfigInteraction {
    SimulateRequested,
    /// Interval or timeout edited; push them into the session
    SettingsChanged,
}

pub fn render_config_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<ConfigInteraction> {
    let mut interaction = None;

    ui.heading("Processes");
    ui.separator();

    let mut remove = None;
    egui::ScrollArea::vertical()
        .id_salt("process_rows_scroll")
        .max_height(ui.available_height() * 0.6)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("process_rows")
                .num_columns(5)
                .striped(true)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Process").strong());
                    ui.label(RichText::new("Burst").strong());
                    ui.label(RichText::new("Arrival").strong());
                    ui.label(RichText::new("Priority").strong());
                    ui.label("");
                    ui.end_row();

                    for (index, row) in state.config.rows_mut().iter_mut().enumerate() {
                        ui.label(process_label(index as u32 + 1));
                        ui.add(DragValue::new(&mut row.burst_time).range(1..=MAX_TIME_VALUE));
                        ui.add(DragValue::new(&mut row.arrival_time).range(0..=MAX_TIME_VALUE));
                        ui.add(DragValue::new(&mut row.priority).range(1..=MAX_PRIORITY))
                            .on_hover_text("Lower value runs first");
                        if ui.small_button("🗑").on_hover_text("Remove process").clicked() {
                            remove = Some(index);
                        }
                        ui.end_row();
                    }
                });
        });

    if let Some(index) = remove {
        state.config.remove_row(index);
    }

    if ui.button("➕ Add Process").clicked() {
        state.config.add_row();
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Policy:");
        let mut policy = state.config.policy();
        egui::ComboBox::from_id_salt("policy_selector")
            .selected_text(policy.display_name())
            .show_ui(ui, |ui| {
                for option in SchedulingPolicy::ALL {
                    ui.selectable_value(&mut policy, option, option.display_name());
                }
            });
        state.config.set_policy(policy);
    });

    ui.add_space(8.0);
    egui::CollapsingHeader::new("Server & Playback")
        .default_open(false)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Server:");
                ui.text_edit_singleline(&mut state.settings.server_url);
            });
            ui.horizontal(|ui| {
                ui.label("Step every");
                let interval = ui.add(
                    DragValue::new(&mut state.settings.tick_interval_ms)
                        .range(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS)
                        .suffix(" ms"),
                );
                if interval.changed() {
                    interaction = Some(ConfigInteraction::SettingsChanged);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Request timeout");
                ui.add(DragValue::new(&mut state.settings.request_timeout_secs).range(1..=300).suffix(" s"));
            });
        });

    ui.add_space(8.0);
    if ui.add(egui::Button::new(RichText::new("▶ Simulate").strong())).clicked() {
        interaction = Some(ConfigInteraction::SimulateRequested);
    }

    if let Some(error) = state.config.error() {
        ui.colored_label(ui.visuals().error_fg_color, error);
    }

    interaction
}

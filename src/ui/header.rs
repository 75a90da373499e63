//! Header panel UI rendering
//!
//! Trace source buttons, playback controls and the theme selector.

use eframe::egui;
use std::path::PathBuf;
use rsched::player::PlaybackPhase;
use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a trace file to open
    OpenFileRequested(PathBuf),
    /// User asked for a locally generated trace
    OpenDemoTraceRequested,
    ReplayRequested,
    StopRequested,
}

/// Renders the application header
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Trace").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Simulation Traces", &["json", "br"])
                .add_filter("All Files", &["*"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🎲 Demo Trace").clicked() {
            interaction = Some(HeaderInteraction::OpenDemoTraceRequested);
        }

        ui.separator();

        let has_trace = state.playback.has_trace();
        let running = state.playback.phase() == PlaybackPhase::Running;

        if ui.add_enabled(has_trace, egui::Button::new("⏮ Replay")).clicked() {
            interaction = Some(HeaderInteraction::ReplayRequested);
        }
        if ui.add_enabled(running, egui::Button::new("⏹ Stop")).clicked() {
            interaction = Some(HeaderInteraction::StopRequested);
        }

        // Push theme selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_theme = state.theme.current_theme_name().to_string();
            let mut current_theme = old_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.theme.theme_manager().list_themes() {
                        ui.selectable_value(
                            &mut current_theme,
                            theme_name.to_string(),
                            theme_name
                        );
                    }
                });

            if old_theme != current_theme {
                state.theme.set_theme(current_theme);
                ui.ctx().request_repaint();
            }

            ui.label("Theme:");
        });
    });

    if let Some(err) = state.playback.error_message().map(str::to_owned) {
        ui.horizontal(|ui| {
            ui.colored_label(ui.visuals().error_fg_color, &err);
            if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                state.playback.dismiss_error();
            }
        });
    }

    interaction
}

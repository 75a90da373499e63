//! Playback panel UI rendering
//!
//! Time indicator, state view and the execution timeline. Everything shown
//! here comes from the retained scenes; nothing is computed per frame.

use eframe::egui;
use egui::RichText;
use rsched::ThemeColors;
use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::rendering::{state_renderer, timeline_renderer};

pub fn render_playback_panel(ui: &mut egui::Ui, state: &AppState, loader: &AsyncLoader, theme_colors: &ThemeColors) {
    let scenes = state.playback.scenes();

    ui.horizontal(|ui| {
        let time_label = scenes
            .state()
            .map(|scene| scene.time_label.clone())
            .unwrap_or_else(|| "Time: -".to_string());
        ui.label(RichText::new(time_label).heading().strong());

        if let Some(description) = loader.loading_description() {
            ui.separator();
            ui.spinner();
            ui.label(format!("Loading {}…", description));
        }
    });
    ui.separator();

    if !state.playback.has_trace() && !loader.is_loading() {
        ui.label(
            RichText::new("Configure processes and press Simulate, or open a trace file.")
                .color(theme_colors.text_dim),
        );
        ui.add_space(4.0);
    }

    let available = ui.available_height();
    state_renderer::render_state_view(ui, scenes.state(), theme_colors, available * 0.6);

    ui.add_space(6.0);
    ui.label(RichText::new("Execution Timeline").strong());
    let remaining = ui.available_height();
    timeline_renderer::render_timeline(ui, scenes.timeline(), theme_colors, remaining);
}

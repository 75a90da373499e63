//! Panel orchestration and layout management.
//!
//! Header on top, status bar and results at the bottom, process
//! configuration on the left and the playback canvases in the center.

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::presentation::color_mapping;
use crate::ui::config_panel::{self, ConfigInteraction};
use crate::ui::header::{self, HeaderInteraction};
use crate::ui::{playback_panel, statistics_panel, status_bar};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    OpenFileRequested(std::path::PathBuf),
    OpenDemoTraceRequested,
    SimulateRequested,
    ReplayRequested,
    StopRequested,
    SettingsChanged,
}

impl From<HeaderInteraction> for PanelInteraction {
    fn from(interaction: HeaderInteraction) -> Self {
        match interaction {
            HeaderInteraction::OpenFileRequested(path) => PanelInteraction::OpenFileRequested(path),
            HeaderInteraction::OpenDemoTraceRequested => PanelInteraction::OpenDemoTraceRequested,
            HeaderInteraction::ReplayRequested => PanelInteraction::ReplayRequested,
            HeaderInteraction::StopRequested => PanelInteraction::StopRequested,
        }
    }
}

impl From<ConfigInteraction> for PanelInteraction {
    fn from(interaction: ConfigInteraction) -> Self {
        match interaction {
            ConfigInteraction::SimulateRequested => PanelInteraction::SimulateRequested,
            ConfigInteraction::SettingsChanged => PanelInteraction::SettingsChanged,
        }
    }
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        let theme_colors = color_mapping::theme_colors(state.theme.theme_manager(), state.theme.current_theme_name()).clone();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(header_interaction.into());
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        // Results only exist once playback completes.
        if let Some(view) = state.playback.scenes().statistics() {
            egui::TopBottomPanel::bottom("statistics_panel")
                .default_height(ctx.content_rect().height() * 0.3)
                .resizable(true)
                .show(ctx, |ui| {
                    egui::Frame::default().inner_margin(4.0).show(ui, |ui| {
                        statistics_panel::render_statistics_panel(ui, view, &theme_colors);
                    });
                });
        }

        let side_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(6))
            .fill(ctx.style().visuals.panel_fill);

        egui::SidePanel::left("config_panel")
            .default_width(320.0)
            .resizable(true)
            .frame(side_frame)
            .show(ctx, |ui| {
                if let Some(config_interaction) = config_panel::render_config_panel(ui, state) {
                    interaction = Some(config_interaction.into());
                }
            });

        let central_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(6))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(central_frame)
            .show(ctx, |ui| {
                playback_panel::render_playback_panel(ui, state, loader, &theme_colors);
            });

        interaction
    }
}

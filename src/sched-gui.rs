//! Scheduling Simulation Player GUI
//!
//! Configure processes, submit them to the simulation server and watch the
//! resulting schedule replay step by step, ending in a statistics summary.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//! The application is built with a modular architecture:
//! - `app/` - Application state and coordination
//! - `state/` - Focused state components (playback, config, settings, theme)
//! - `io/` - Background trace acquisition
//! - `ui/` - Panel rendering and interaction
//! - `rendering/` - Painting scenes onto egui canvases
//! - `presentation/` - Theme colors and canvas coordinate mapping
//! - `utils/` - Formatting helpers

use std::path::PathBuf;
use std::time::Instant;
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod utils;
mod presentation;
mod io;
mod app;
mod rendering;
mod ui;
mod state;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator};
use io::AsyncLoader;
use state::ThemeState;
use ui::panel_manager::{PanelInteraction, PanelManager};

#[derive(Parser, Debug)]
#[command(author, version, about = "CPU scheduling simulation player")]
struct Cli {
    /// Trace file to play on startup (.json or .json.br)
    trace_file: Option<PathBuf>,
    /// Base URL of the simulation server
    #[arg(long, env = "RSCHED_SERVER_URL")]
    server: Option<String>,
    /// Milliseconds between playback steps
    #[arg(long)]
    interval_ms: Option<u64>,
}

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Scheduling Simulation Player"),
        ..Default::default()
    };

    eframe::run_native(
        "Scheduling Simulation Player",
        options,
        Box::new(move |cc| Ok(Box::new(PlayerApp::new(cc, cli)))),
    )
}

/// The scheduling player application.
///
/// Delegates to coordinators:
/// - `ApplicationCoordinator` handles loads, playback commands and errors
/// - `ThemeCoordinator` and `SettingsCoordinator` handle persistence
/// - `PanelManager` handles panel layout and rendering
struct PlayerApp {
    state: AppState,
    loader: AsyncLoader,
    /// File to load on the first frame
    pending_file_load: Option<PathBuf>,
}

impl PlayerApp {
    /// Restores persisted preferences, then applies command-line overrides.
    fn new(cc: &eframe::CreationContext, cli: Cli) -> Self {
        let theme_name = ThemeCoordinator::load_theme_from_storage(cc.storage);
        let settings = SettingsCoordinator::load_player_settings(cc.storage)
            .with_overrides(cli.server, cli.interval_ms);
        let config = SettingsCoordinator::load_config(cc.storage);

        tracing::info!(server = %settings.server_url, interval_ms = settings.tick_interval_ms, "player starting");

        Self {
            state: AppState::new(ThemeState::with_theme(theme_name), config, settings),
            loader: AsyncLoader::new(),
            pending_file_load: cli.trace_file,
        }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
            }
            PanelInteraction::OpenDemoTraceRequested => {
                ApplicationCoordinator::open_demo_trace(&mut self.state, &mut self.loader);
            }
            PanelInteraction::SimulateRequested => {
                ApplicationCoordinator::simulate(&mut self.state, &mut self.loader, ctx);
            }
            PanelInteraction::ReplayRequested => {
                ApplicationCoordinator::replay(&mut self.state);
            }
            PanelInteraction::StopRequested => {
                ApplicationCoordinator::stop(&mut self.state);
            }
            PanelInteraction::SettingsChanged => {
                self.state.apply_settings();
            }
        }
    }
}

impl eframe::App for PlayerApp {
    /// Called when the app is being shut down and periodically by eframe.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
        SettingsCoordinator::save_app_settings(storage, &self.state);
    }

    /// Main update loop:
    /// 1. Pick up finished loads
    /// 2. Deliver a due playback tick
    /// 3. Apply theme and render panels
    /// 4. Handle panel interactions
    /// 5. Schedule the next repaint for the next tick
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader);

        let next_tick = ApplicationCoordinator::poll_playback(&mut self.state, Instant::now());

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }

        // A start or replay this frame armed a fresh timer; ask again.
        let next_tick = next_tick.or_else(|| self.state.playback.session().time_until_next_tick(Instant::now()));
        if let Some(delay) = next_tick {
            ctx.request_repaint_after(delay);
        }
    }
}

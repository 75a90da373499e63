//! Status bar UI rendering
//!
//! Memory use, playback phase, progress through the trace and its source.

use eframe::egui;
use egui::RichText;
use rsched::player::PlaybackPhase;
use crate::app::AppState;
use crate::utils::{format_interval, format_memory_mb, get_current_memory_mb};

pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        let playback = &state.playback;
        let session = playback.session();
        let Some(trace) = session.trace() else {
            ui.label(RichText::new("No trace loaded").strong());
            return;
        };

        let phase = playback.phase();
        let phase_text = RichText::new(phase.label()).strong();
        let phase_text = match phase {
            PlaybackPhase::Faulted => phase_text.color(ui.visuals().error_fg_color),
            PlaybackPhase::Completed => phase_text.color(ui.visuals().hyperlink_color),
            _ => phase_text,
        };
        ui.label(phase_text);
        ui.label(RichText::new("|").strong());

        ui.label(RichText::new(format!(
            "Step {} / {} | Processes: {} | Every {}",
            session.cursor(),
            session.step_count(),
            trace.statistics.process_details.len(),
            format_interval(session.interval())
        )).strong());

        if let Some(source) = playback.source() {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(format!("Source: {}", source)).strong());
        }
    });
}

//! State view rendering
//!
//! Draws a `StateScene`: the CPU slot with the running process and the ready
//! queue below it.

use eframe::egui;
use egui::{Align2, FontId, Stroke};
use rsched::scene::{Indicator, StateScene, INDICATOR_RADIUS, QUEUE_ORIGIN, RUNNING_ANCHOR, SCENE_SIZE};
use rsched::theme::label_color_for;
use rsched::ThemeColors;
use crate::presentation::canvas::CanvasTransform;
use crate::presentation::color_mapping;

/// Renders the state view into `ui`, filling the available width.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `scene` - Scene for the current step, `None` before the first tick
/// * `colors` - Color palette for the current theme
/// * `max_height` - Upper bound for the canvas height
pub fn render_state_view(ui: &mut egui::Ui, scene: Option<&StateScene>, colors: &ThemeColors, max_height: f32) {
    let width = ui.available_width();
    let height = (width * SCENE_SIZE.y / SCENE_SIZE.x).min(max_height).max(80.0);
    let (rect, _response) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    let t = CanvasTransform::fit(SCENE_SIZE, rect);
    painter.rect_filled(t.bounds(SCENE_SIZE), 4.0, colors.canvas);

    // CPU slot
    let slot = t.pos(RUNNING_ANCHOR);
    painter.circle_stroke(slot, t.len(INDICATOR_RADIUS + 8.0), Stroke::new(1.5, colors.outline));
    painter.text(
        t.pos(RUNNING_ANCHOR - egui::vec2(0.0, INDICATOR_RADIUS + 18.0)),
        Align2::CENTER_BOTTOM,
        "CPU",
        FontId::proportional(t.len(14.0).max(9.0)),
        colors.text_dim,
    );
    painter.text(
        t.pos(QUEUE_ORIGIN - egui::vec2(INDICATOR_RADIUS, INDICATOR_RADIUS + 14.0)),
        Align2::LEFT_BOTTOM,
        "Ready Queue",
        FontId::proportional(t.len(14.0).max(9.0)),
        colors.text_dim,
    );

    let Some(scene) = scene else {
        return;
    };

    for indicator in scene.indicators() {
        draw_indicator(&painter, &t, indicator, colors);
    }

    if scene.running.is_none() {
        painter.text(
            slot,
            Align2::CENTER_CENTER,
            "idle",
            FontId::proportional(t.len(12.0).max(8.0)),
            colors.text_dim,
        );
    }
}

fn draw_indicator(painter: &egui::Painter, t: &CanvasTransform, indicator: &Indicator, colors: &ThemeColors) {
    let center = t.pos(indicator.center);
    let radius = t.len(indicator.radius);

    painter.circle_filled(center, radius, indicator.fill);
    painter.circle_stroke(
        center,
        radius,
        Stroke::new(1.5, color_mapping::outline_for(indicator.fill, colors)),
    );
    painter.text(
        center,
        Align2::CENTER_CENTER,
        &indicator.label,
        FontId::proportional(t.len(14.0).max(8.0)),
        label_color_for(indicator.fill),
    );

    if let Some(remaining) = indicator.remaining_time {
        painter.text(
            center + egui::vec2(0.0, radius + 4.0),
            Align2::CENTER_TOP,
            format!("{} left", remaining),
            FontId::proportional(t.len(11.0).max(8.0)),
            colors.text_dim,
        );
    }
}

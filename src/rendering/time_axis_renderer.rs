//! Time axis rendering logic
//!
//! Labels timeline slots with their simulated start time. Long histories only
//! label every n-th slot so the labels never overlap.

use eframe::egui;
use egui::{Align2, FontId, Stroke};
use rsched::scene::{TimelineScene, BLOCK_HALF_HEIGHT, TIMELINE_AXIS_Y};
use rsched::ThemeColors;
use crate::presentation::canvas::CanvasTransform;

/// Minimum screen distance between two axis labels.
const MIN_LABEL_SPACING: f32 = 28.0;

/// Smallest power of ten that is at least `value`.
pub fn next_power_of_10(value: f32) -> usize {
    if value <= 1.0 {
        return 1;
    }
    let log_value = value.log10().ceil();
    10_usize.pow(log_value as u32)
}

/// Labels every `stride`-th slot. Strides are 1, 2, 5 times a power of ten.
pub fn label_stride(slot_screen_width: f32) -> usize {
    if slot_screen_width <= 0.0 {
        return 1;
    }
    let needed = MIN_LABEL_SPACING / slot_screen_width;
    let base = next_power_of_10(needed);
    // Prefer the finer strides 0.2x and 0.5x of the power when they fit.
    for candidate in [base / 5, base / 2, base] {
        if candidate >= 1 && candidate as f32 >= needed {
            return candidate;
        }
    }
    base
}

/// Renders tick marks and time labels under the timeline axis.
pub fn render_time_axis(
    painter: &egui::Painter,
    t: &CanvasTransform,
    scene: &TimelineScene,
    colors: &ThemeColors,
) {
    if scene.slot_count == 0 {
        return;
    }

    let stride = label_stride(t.len(scene.slot_width));
    let tick_top = TIMELINE_AXIS_Y + BLOCK_HALF_HEIGHT;

    for (index, time) in scene.slot_times.iter().enumerate().step_by(stride) {
        let (left, _) = scene.slot_x_range(index);
        let top = t.pos(egui::pos2(left, tick_top));
        painter.line_segment(
            [top, top + egui::vec2(0.0, t.len(6.0))],
            Stroke::new(1.0, colors.axis),
        );
        painter.text(
            top + egui::vec2(0.0, t.len(8.0)),
            Align2::CENTER_TOP,
            time.to_string(),
            FontId::proportional(t.len(11.0).max(8.0)),
            colors.text_dim,
        );
    }
}

//! Timeline rendering logic
//!
//! Draws a `TimelineScene`: the baseline axis, one block per executed time
//! slot, and the time axis labels. Idle slots and slots past the cursor get
//! nothing, leaving a gap on the axis.

use eframe::egui;
use egui::{Align2, FontId, Stroke, StrokeKind};
use rsched::scene::{TimelineScene, TIMELINE_SIZE};
use rsched::theme::label_color_for;
use rsched::ThemeColors;
use crate::presentation::canvas::CanvasTransform;
use crate::presentation::color_mapping;
use crate::rendering::time_axis_renderer;

/// Blocks narrower than this on screen are drawn without a label.
const MIN_LABEL_WIDTH: f32 = 18.0;

/// Renders the execution timeline into `ui`, filling the available width.
///
/// Hovering a block shows which process ran and when.
pub fn render_timeline(ui: &mut egui::Ui, scene: Option<&TimelineScene>, colors: &ThemeColors, max_height: f32) {
    let width = ui.available_width();
    let height = (width * TIMELINE_SIZE.y / TIMELINE_SIZE.x).min(max_height).max(60.0);
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    let t = CanvasTransform::fit(TIMELINE_SIZE, rect);
    painter.rect_filled(t.bounds(TIMELINE_SIZE), 4.0, colors.canvas);

    let Some(scene) = scene else {
        return;
    };

    let mut hovered = None;
    for block in &scene.blocks {
        let block_rect = t.rect(block.rect);
        painter.rect_filled(block_rect, 0.0, block.fill);
        painter.rect_stroke(
            block_rect,
            0.0,
            Stroke::new(1.0, color_mapping::outline_for(block.fill, colors)),
            StrokeKind::Inside,
        );
        if block_rect.width() >= MIN_LABEL_WIDTH {
            painter.text(
                block_rect.center(),
                Align2::CENTER_CENTER,
                &block.label,
                FontId::proportional(t.len(12.0).max(8.0).min(block_rect.height() * 0.6)),
                label_color_for(block.fill),
            );
        }
        if response.hover_pos().is_some_and(|p| block_rect.contains(p)) {
            hovered = Some(block);
        }
    }

    painter.line_segment(
        [t.pos(scene.axis[0]), t.pos(scene.axis[1])],
        Stroke::new(2.0, colors.axis),
    );

    time_axis_renderer::render_time_axis(&painter, &t, scene, colors);

    if let Some(block) = hovered {
        response.on_hover_text(format!("{} ran at time {}", block.label, block.time));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::epaint::Shape;
    use egui::Color32;
    use rsched::scene::timeline_scene;
    use rsched::{ProcessSnapshot, ThemeManager, TimeStep};

    fn busy(time: u64, color: &str) -> TimeStep {
        TimeStep {
            time,
            running: Some(ProcessSnapshot::new(1, color)),
            queue: vec![],
        }
    }

    /// Fills of every filled rectangle painted for `scene`.
    fn painted_fills(scene: &TimelineScene) -> Vec<Color32> {
        let ctx = egui::Context::default();
        let manager = ThemeManager::new();
        let colors = manager.theme_or_default("Dark").colors.clone();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                render_timeline(ui, Some(scene), &colors, 400.0);
            });
        });
        output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                Shape::Rect(rect) if rect.fill != Color32::TRANSPARENT => Some(rect.fill),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_only_executed_slots_up_to_cursor_are_painted() {
        let history = vec![busy(0, "#f00"), TimeStep::idle(1), busy(2, "#0f0")];
        let scene = timeline_scene(&history, 1).unwrap();
        let fills = painted_fills(&scene);

        let red = fills.iter().filter(|&&c| c == Color32::from_rgb(255, 0, 0)).count();
        assert_eq!(red, 1);
        assert!(!fills.contains(&Color32::from_rgb(0, 255, 0)));
        // Nothing translucent stands in for the idle slot.
        assert!(fills.iter().all(|c| c.a() == 255));
    }
}

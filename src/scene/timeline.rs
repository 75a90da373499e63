//! Cumulative execution timeline: one equal-width slot per time step.

use anyhow::{Context, Result};
use egui::{pos2, vec2, Color32, Pos2, Rect, Vec2};
use crate::model::{Pid, TimeStep};
use crate::theme::parse_css_color;

/// Size of the timeline canvas in scene units.
pub const TIMELINE_SIZE: Vec2 = vec2(800.0, 200.0);
/// Left end of the baseline axis.
pub const TIMELINE_ORIGIN_X: f32 = 50.0;
/// Width reserved for all slots together.
pub const TIMELINE_SPAN: f32 = 700.0;
/// Vertical position of the baseline axis.
pub const TIMELINE_AXIS_Y: f32 = 100.0;
/// Blocks extend this far above and below the axis.
pub const BLOCK_HALF_HEIGHT: f32 = 20.0;

/// Execution of one process during one time step.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBlock {
    /// Index of the step in the trace history
    pub step: usize,
    /// Simulated time of that step
    pub time: u64,
    pub pid: Pid,
    pub label: String,
    pub fill: Color32,
    pub rect: Rect,
}

/// The whole timeline as of the current cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineScene {
    pub axis: [Pos2; 2],
    pub slot_width: f32,
    pub slot_count: usize,
    /// Start time of every slot, used for axis labels
    pub slot_times: Vec<u64>,
    pub blocks: Vec<TimelineBlock>,
}

impl TimelineScene {
    /// Horizontal extent of slot `index`.
    pub fn slot_x_range(&self, index: usize) -> (f32, f32) {
        slot_x_range(index, self.slot_width)
    }
}

/// Width of one slot for a history of `step_count` steps.
///
/// Depends only on the history length, so it stays fixed for a whole playback.
pub fn slot_width(step_count: usize) -> f32 {
    if step_count == 0 {
        0.0
    } else {
        TIMELINE_SPAN / step_count as f32
    }
}

fn slot_x_range(index: usize, width: f32) -> (f32, f32) {
    let left = TIMELINE_ORIGIN_X + index as f32 * width;
    (left, left + width)
}

/// Rebuilds the timeline for every step up to and including `through`.
///
/// Steps without a running process leave their slot empty. `through` past the
/// end of the history is clamped to the last step.
pub fn timeline_scene(history: &[TimeStep], through: usize) -> Result<TimelineScene> {
    let width = slot_width(history.len());
    let visible = history.len().min(through.saturating_add(1));

    let mut blocks = Vec::new();
    for (index, step) in history.iter().enumerate().take(visible) {
        let Some(process) = &step.running else {
            continue;
        };

        let fill = parse_css_color(&process.color).with_context(|| {
            format!("process {} at time {} has an unusable color", process.label(), step.time)
        })?;

        let (left, right) = slot_x_range(index, width);
        blocks.push(TimelineBlock {
            step: index,
            time: step.time,
            pid: process.pid,
            label: process.label(),
            fill,
            rect: Rect::from_min_max(
                pos2(left, TIMELINE_AXIS_Y - BLOCK_HALF_HEIGHT),
                pos2(right, TIMELINE_AXIS_Y + BLOCK_HALF_HEIGHT),
            ),
        });
    }

    Ok(TimelineScene {
        axis: [
            pos2(TIMELINE_ORIGIN_X, TIMELINE_AXIS_Y),
            pos2(TIMELINE_ORIGIN_X + TIMELINE_SPAN, TIMELINE_AXIS_Y),
        ],
        slot_width: width,
        slot_count: history.len(),
        slot_times: history.iter().map(|s| s.time).collect(),
        blocks,
    })
}

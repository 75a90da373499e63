//! Per-step scene: which process holds the CPU and who is waiting.

use anyhow::{Context, Result};
use egui::{pos2, vec2, Color32, Pos2, Vec2};
use crate::model::{Pid, ProcessSnapshot, TimeStep};
use crate::theme::parse_css_color;

/// Size of the scene canvas in scene units.
pub const SCENE_SIZE: Vec2 = vec2(800.0, 400.0);
/// Where the running process is drawn.
pub const RUNNING_ANCHOR: Pos2 = pos2(400.0, 130.0);
/// Center of the first ready-queue slot.
pub const QUEUE_ORIGIN: Pos2 = pos2(100.0, 290.0);
/// Horizontal distance between consecutive queue entries.
pub const QUEUE_SPACING: f32 = 50.0;
pub const INDICATOR_RADIUS: f32 = 20.0;

/// One drawn process marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub pid: Pid,
    pub label: String,
    pub fill: Color32,
    pub center: Pos2,
    pub radius: f32,
    pub remaining_time: Option<u32>,
}

impl Indicator {
    fn from_snapshot(process: &ProcessSnapshot, center: Pos2) -> Result<Self> {
        let fill = parse_css_color(&process.color)
            .with_context(|| format!("process {} has an unusable color", process.label()))?;
        Ok(Self {
            pid: process.pid,
            label: process.label(),
            fill,
            center,
            radius: INDICATOR_RADIUS,
            remaining_time: process.remaining_time,
        })
    }
}

/// Everything the state renderer draws for a single time step.
#[derive(Debug, Clone, PartialEq)]
pub struct StateScene {
    pub time: u64,
    pub time_label: String,
    pub running: Option<Indicator>,
    pub queue: Vec<Indicator>,
}

impl StateScene {
    /// Total number of indicators in the scene.
    pub fn indicator_count(&self) -> usize {
        self.queue.len() + usize::from(self.running.is_some())
    }

    /// Iterates over every indicator, running process first.
    pub fn indicators(&self) -> impl Iterator<Item = &Indicator> {
        self.running.iter().chain(self.queue.iter())
    }
}

/// Center of the ready-queue slot at `index`.
pub fn queue_slot_center(index: usize) -> Pos2 {
    pos2(QUEUE_ORIGIN.x + index as f32 * QUEUE_SPACING, QUEUE_ORIGIN.y)
}

/// Computes the scene for one time step.
///
/// Fails only when the step carries data that cannot be drawn (a color that
/// does not parse).
pub fn state_scene(step: &TimeStep) -> Result<StateScene> {
    let running = step
        .running
        .as_ref()
        .map(|process| Indicator::from_snapshot(process, RUNNING_ANCHOR))
        .transpose()?;

    let queue = step
        .queue
        .iter()
        .enumerate()
        .map(|(index, process)| Indicator::from_snapshot(process, queue_slot_center(index)))
        .collect::<Result<Vec<_>>>()?;

    Ok(StateScene {
        time: step.time,
        time_label: format!("Time: {}", step.time),
        running,
        queue,
    })
}

//! Trace data model shared by every trace source and the player.
//!
//! These types mirror the JSON document returned by the `/simulate` endpoint:
//! a `history` of per-time-unit snapshots followed by the run's `statistics`.

use serde::{Deserialize, Serialize};

/// Process identifier as assigned by the simulator (1-based).
pub type Pid = u32;

/// Visual identity of a process at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub pid: Pid,
    /// CSS hex color string (`#rgb` or `#rrggbb`)
    pub color: String,
    /// Remaining burst time at this instant, when the simulator reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<u32>,
}

impl ProcessSnapshot {
    pub fn new(pid: Pid, color: impl Into<String>) -> Self {
        Self {
            pid,
            color: color.into(),
            remaining_time: None,
        }
    }

    /// Display label used by every renderer.
    pub fn label(&self) -> String {
        process_label(self.pid)
    }
}

/// Snapshot of CPU occupancy and ready queue for one simulated time unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStep {
    pub time: u64,
    #[serde(default)]
    pub running: Option<ProcessSnapshot>,
    #[serde(default)]
    pub queue: Vec<ProcessSnapshot>,
}

impl TimeStep {
    /// A time unit where the CPU is idle and nothing is ready.
    pub fn idle(time: u64) -> Self {
        Self {
            time,
            running: None,
            queue: Vec::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }
}

/// Per-process outcome reported in the statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDetail {
    pub pid: Pid,
    pub priority: u32,
    pub waiting_time: f64,
    pub turnaround_time: f64,
    pub completion_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burst_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}

/// Aggregate results of a simulation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    #[serde(default)]
    pub completion_order: Vec<Pid>,
    #[serde(default)]
    pub process_details: Vec<ProcessDetail>,
}

/// A complete simulation record: ordered time steps plus final statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    pub history: Vec<TimeStep>,
    pub statistics: Statistics,
}

impl Trace {
    pub fn new(history: Vec<TimeStep>, statistics: Statistics) -> Self {
        Self { history, statistics }
    }

    /// Number of time steps the player will render.
    pub fn step_count(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns the (first, last) simulated time covered by the history.
    pub fn time_extent(&self) -> Option<(u64, u64)> {
        let first = self.history.first()?.time;
        let last = self.history.last()?.time;
        Some((first, last))
    }

    /// Number of steps in which some process occupied the CPU.
    pub fn busy_steps(&self) -> usize {
        self.history.iter().filter(|s| !s.is_idle()).count()
    }
}

/// Formats a pid the way the player labels processes (`P3`).
pub fn process_label(pid: Pid) -> String {
    format!("P{}", pid)
}

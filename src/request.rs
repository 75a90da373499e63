//! Simulation request built from the process configuration.

use serde::{Deserialize, Serialize};

/// Scheduling policies understood by the simulation server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// Priority scheduling; a running process is never interrupted
    #[default]
    NonPreemptive,
    /// Priority scheduling; a higher-priority arrival takes the CPU
    Preemptive,
}

impl SchedulingPolicy {
    pub const ALL: [SchedulingPolicy; 2] = [SchedulingPolicy::NonPreemptive, SchedulingPolicy::Preemptive];

    /// Value sent in the `schedulingType` form field.
    pub fn wire_name(self) -> &'static str {
        match self {
            SchedulingPolicy::NonPreemptive => "non_preemptive",
            SchedulingPolicy::Preemptive => "preemptive",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SchedulingPolicy::NonPreemptive => "Priority (non-preemptive)",
            SchedulingPolicy::Preemptive => "Priority (preemptive)",
        }
    }
}

/// One configured process. Its pid is its 1-based position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRow {
    pub burst_time: u32,
    pub arrival_time: u32,
    pub priority: u32,
}

impl Default for ProcessRow {
    fn default() -> Self {
        Self {
            burst_time: 1,
            arrival_time: 0,
            priority: 1,
        }
    }
}

/// A configuration problem found before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("add at least one process before simulating")]
    NoProcesses,
    #[error("process {index}: burst time must be at least 1")]
    ZeroBurst { index: usize },
    #[error("process {index}: priority must be at least 1")]
    ZeroPriority { index: usize },
}

impl ProcessRow {
    /// Checks the row's fields; `index` is its 1-based position.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.burst_time < 1 {
            return Err(ConfigError::ZeroBurst { index });
        }
        if self.priority < 1 {
            return Err(ConfigError::ZeroPriority { index });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub policy: SchedulingPolicy,
    pub processes: Vec<ProcessRow>,
}

impl SimulationRequest {
    pub fn new(policy: SchedulingPolicy, processes: Vec<ProcessRow>) -> Self {
        Self { policy, processes }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processes.is_empty() {
            return Err(ConfigError::NoProcesses);
        }
        for (i, row) in self.processes.iter().enumerate() {
            row.validate(i + 1)?;
        }
        Ok(())
    }

    /// Form fields in submission order.
    ///
    /// Rows are numbered by position, so the server always sees
    /// `1..=processCount` without gaps.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(2 + self.processes.len() * 3);
        fields.push(("schedulingType".to_string(), self.policy.wire_name().to_string()));
        fields.push(("processCount".to_string(), self.processes.len().to_string()));

        for (i, row) in self.processes.iter().enumerate() {
            let n = i + 1;
            fields.push((format!("burst_time_{}", n), row.burst_time.to_string()));
            fields.push((format!("arrival_time_{}", n), row.arrival_time.to_string()));
            fields.push((format!("priority_{}", n), row.priority.to_string()));
        }
        fields
    }
}

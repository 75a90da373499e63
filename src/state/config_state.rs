//! Process configuration being edited before submission.

use rsched::{ConfigError, ProcessRow, SchedulingPolicy, SimulationRequest};

/// Rows and policy shown in the configuration panel.
///
/// A row's pid is its position, so removing a row renumbers the rows after it.
#[derive(Debug, Clone)]
pub struct ConfigState {
    rows: Vec<ProcessRow>,
    policy: SchedulingPolicy,
    /// Validation message from the last submit attempt
    error: Option<String>,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self::new(vec![ProcessRow::default()], SchedulingPolicy::default())
    }
}

impl ConfigState {
    pub fn new(rows: Vec<ProcessRow>, policy: SchedulingPolicy) -> Self {
        Self {
            rows,
            policy,
            error: None,
        }
    }

    pub fn rows(&self) -> &[ProcessRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<ProcessRow> {
        &mut self.rows
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SchedulingPolicy) {
        self.policy = policy;
    }

    pub fn add_row(&mut self) {
        self.rows.push(ProcessRow::default());
    }

    pub fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Builds the request to submit, or records why it cannot be sent.
    pub fn request(&mut self) -> Result<SimulationRequest, ConfigError> {
        let request = SimulationRequest::new(self.policy, self.rows.clone());
        match request.validate() {
            Ok(()) => {
                self.error = None;
                Ok(request)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

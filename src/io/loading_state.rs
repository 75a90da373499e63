//! Shared state of the in-flight load.

/// Holds the state of the current background load.
///
/// Wrapped in an `Arc<Mutex<>>` and shared with the loader thread. Only the
/// load whose ticket matches `active` may clear it, so a superseded thread
/// finishing late never hides the indicator of the newer load.
#[derive(Debug, Default)]
pub struct LoadingState {
    /// Ticket of the load in progress, if any
    pub active: Option<u64>,
    /// What is being loaded, for the status bar
    pub description: String,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_progress(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin(&mut self, ticket: u64, description: String) {
        self.active = Some(ticket);
        self.description = description;
    }

    /// Marks `ticket` finished. Returns false when a newer load took over.
    pub fn finish(&mut self, ticket: u64) -> bool {
        if self.active == Some(ticket) {
            self.active = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_ticket_does_not_finish_newer_load() {
        let mut state = LoadingState::new();
        state.begin(1, "first".into());
        state.begin(2, "second".into());

        assert!(!state.finish(1));
        assert!(state.in_progress());
        assert!(state.finish(2));
        assert!(!state.in_progress());
    }
}

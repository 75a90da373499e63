//! Render targets for playback.
//!
//! The driver never draws directly. It hands finished scenes to a
//! `PlaybackSurface`, and each call replaces whatever that surface showed for
//! the same area before.

use anyhow::Result;
use crate::scene::{StateScene, StatisticsView, TimelineScene};

/// The four independently addressable display areas of the player.
pub trait PlaybackSurface {
    /// Replaces the time indicator, running indicator and queue.
    fn show_state(&mut self, scene: &StateScene) -> Result<()>;

    /// Replaces the execution timeline.
    fn show_timeline(&mut self, scene: &TimelineScene) -> Result<()>;

    /// Replaces the results area.
    fn show_statistics(&mut self, view: &StatisticsView) -> Result<()>;

    /// Removes everything from every area.
    fn clear(&mut self);
}

/// Retained surface holding the latest scene for each area.
///
/// The GUI paints from this every frame.
#[derive(Debug, Clone, Default)]
pub struct SceneBuffer {
    state: Option<StateScene>,
    timeline: Option<TimelineScene>,
    statistics: Option<StatisticsView>,
    /// Number of scenes applied since the last clear
    revision: u64,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&StateScene> {
        self.state.as_ref()
    }

    pub fn timeline(&self) -> Option<&TimelineScene> {
        self.timeline.as_ref()
    }

    pub fn statistics(&self) -> Option<&StatisticsView> {
        self.statistics.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.timeline.is_none() && self.statistics.is_none()
    }
}

impl PlaybackSurface for SceneBuffer {
    fn show_state(&mut self, scene: &StateScene) -> Result<()> {
        self.state = Some(scene.clone());
        self.revision += 1;
        Ok(())
    }

    fn show_timeline(&mut self, scene: &TimelineScene) -> Result<()> {
        self.timeline = Some(scene.clone());
        self.revision += 1;
        Ok(())
    }

    fn show_statistics(&mut self, view: &StatisticsView) -> Result<()> {
        self.statistics = Some(view.clone());
        self.revision += 1;
        Ok(())
    }

    fn clear(&mut self) {
        self.state = None;
        self.timeline = None;
        self.statistics = None;
        self.revision = 0;
    }
}

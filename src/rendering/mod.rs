//! Rendering subsystem for drawing playback scenes
//!
//! - State view (time indicator, running process, ready queue)
//! - Execution timeline (blocks per time slot)
//! - Time axis labels under the timeline

pub mod state_renderer;
pub mod timeline_renderer;
pub mod time_axis_renderer;

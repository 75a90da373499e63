//! Declarative scene descriptions computed from trace data.
//!
//! Each function here is pure: it turns a time step (or the history up to the
//! cursor, or the final statistics) into a description of what should be on
//! screen. Scene coordinates are fixed canvas units; the GUI scales them into
//! whatever rectangle it has available.
//!
//! - `state` - running-process indicator and ready-queue snapshot
//! - `timeline` - cumulative proportional execution bar
//! - `statistics` - final averages, completion order and per-process table

pub mod state;
pub mod timeline;
pub mod statistics;

pub use state::{
    queue_slot_center, state_scene, Indicator, StateScene, INDICATOR_RADIUS, QUEUE_ORIGIN, QUEUE_SPACING,
    RUNNING_ANCHOR, SCENE_SIZE,
};
pub use timeline::{
    slot_width, timeline_scene, TimelineBlock, TimelineScene, BLOCK_HALF_HEIGHT, TIMELINE_AXIS_Y,
    TIMELINE_ORIGIN_X, TIMELINE_SIZE, TIMELINE_SPAN,
};
pub use statistics::{format_number, statistics_view, DetailRow, StatisticsView, DETAIL_COLUMNS};

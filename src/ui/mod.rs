//! UI panel rendering subsystem
//!
//! - Header (trace sources, playback controls, theme selector, errors)
//! - Config panel (process rows, policy, server settings, simulate)
//! - Playback panel (state view and execution timeline)
//! - Statistics panel (results shown once playback completes)
//! - Status bar (memory, phase, progress, trace source)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod config_panel;
pub mod playback_panel;
pub mod statistics_panel;
pub mod status_bar;
pub mod panel_manager;

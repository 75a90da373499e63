//! Presentation layer for visual styling.
//!
//! - Theme colors used by the canvases
//! - Mapping from logical scene coordinates to screen space

pub mod color_mapping;
pub mod canvas;

//! Utility modules for the scheduling player GUI.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_interval, format_memory_mb, get_current_memory_mb};

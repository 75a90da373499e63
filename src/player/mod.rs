//! Trace playback.
//!
//! - `store` - loaded trace and cursor
//! - `driver` - Idle/Running/Completed state machine advanced by ticks
//! - `scheduler` - where ticks come from (wall clock or manual)
//! - `session` - owns one of each and is what callers hold

pub mod store;
pub mod driver;
pub mod scheduler;
pub mod session;
mod error;

pub use store::{StepLookup, TraceStore};
pub use driver::{PlaybackPhase, StepDriver, TickOutcome, DEFAULT_TICK_INTERVAL};
pub use scheduler::{IntervalScheduler, ManualScheduler, TickScheduler, TimerId};
pub use session::PlaybackSession;
pub use error::PlaybackError;

pub mod model;
pub mod traits;
pub mod parser;
pub mod writer;
pub mod virtual_reader;
pub mod request;
pub mod client;
pub mod theme;
pub mod scene;
pub mod surface;
pub mod player;

// Export data model
pub use model::{Pid, ProcessDetail, ProcessSnapshot, Statistics, TimeStep, Trace, process_label};

// Export trace sources
pub use traits::TraceReader;
pub use parser::{FileTraceReader, parse_trace, read_trace_file};
pub use virtual_reader::{VirtualTraceReader, simulate};
pub use client::{FetchError, SimulationClient, SimulationReader};

// Export writer
pub use writer::TraceWriter;

// Export simulation request
pub use request::{ConfigError, ProcessRow, SchedulingPolicy, SimulationRequest};

// Export playback
pub use player::{
    PlaybackError, PlaybackPhase, PlaybackSession, StepDriver, TickOutcome,
    TickScheduler, TimerId, TraceStore, IntervalScheduler, ManualScheduler
};
pub use surface::{PlaybackSurface, SceneBuffer};

// Export theme support
pub use theme::{Theme, ThemeColors, ThemeManager, hex_to_color32, adjust_brightness};

use crate::model::Trace;

/// Trait for anything that can produce a complete trace.
///
/// Implementations block until the trace is available, so callers that must
/// stay responsive (the GUI) run them on a background thread.
/// Readers must be Send to support async loading in background threads.
pub trait TraceReader: Send {
    /// Produces the trace, or an error describing why it could not be obtained
    fn read(&self) -> anyhow::Result<Trace>;

    /// Short human-readable description of where the trace comes from
    fn describe(&self) -> String;
}

impl<T: TraceReader + ?Sized> TraceReader for Box<T> {
    fn read(&self) -> anyhow::Result<Trace> {
        (**self).read()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

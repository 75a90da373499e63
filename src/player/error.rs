/// Errors that end a playback run.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("no trace loaded")]
    NoTrace,

    /// Drawing step `step` failed; the driver has already stopped its timer.
    #[error("playback stopped at step {step}: {source:#}")]
    Render {
        step: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to show statistics: {source:#}")]
    Statistics {
        #[source]
        source: anyhow::Error,
    },
}

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the plot renderer.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backend drawing failure. Carries the backend's message; the concrete
    /// error type differs per backend, so it is flattened here.
    #[error("render error for {path}: {message}")]
    Render { path: PathBuf, message: String },

    /// A series with no samples cannot be plotted.
    #[error("empty sample series for {broadcast}")]
    EmptySeries { broadcast: String },
}

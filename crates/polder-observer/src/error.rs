//! Error types for run-artifact export.

/// Errors that can occur while writing run artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Creating the output directory or writing a file failed.
    #[error("failed to write artifact: {source}")]
    Io {
        /// The underlying IO error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing the run manifest failed.
    #[error("failed to serialize manifest: {source}")]
    Serialization {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

//! Error types for the polder engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup, simulation execution, and artifact
//! export.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: polder_core::config::ConfigError,
    },

    /// Building the simulation state failed.
    #[error("build error: {source}")]
    Build {
        /// The underlying period-cycle error.
        #[from]
        source: polder_core::tick::TickError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: polder_core::runner::RunnerError,
    },

    /// Writing per-run artifacts failed.
    #[error("export error: {source}")]
    Export {
        /// The underlying export error.
        #[from]
        source: polder_observer::ExportError,
    },

    /// Writing a batch-level artifact failed.
    #[error("batch artifact error: {source}")]
    Io {
        /// The underlying IO error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing the sweep plan failed.
    #[error("plan serialization error: {source}")]
    Plan {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

//! Error types for the Tavern engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and the day cycle.

/// Top-level error for the Tavern engine binary.
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
        source: tavern_core::config::ConfigError,
    },

    /// Visitor scheduler construction failed.
    #[error("visitor scheduler error: {source}")]
    Visitors {
        /// The underlying visitor error.
        #[from]
        source: tavern_core::visitors::VisitorError,
    },

    /// Phase transition failed.
    #[error("phase error: {source}")]
    Phase {
        /// The underlying phase error.
        #[from]
        source: tavern_core::phase::PhaseError,
    },

    /// A consumer task panicked or was cancelled.
    #[error("task join error: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}

//! Error types for the Karst engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup.

/// Top-level error for the Karst engine binary.
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
        source: crate::config::ConfigError,
    },

    /// Registry data files failed to load or validate.
    #[error("registry error: {source}")]
    Registry {
        /// The underlying registry error.
        #[from]
        source: karst_registry::RegistryError,
    },

    /// NATS connection or messaging failed.
    #[error("NATS error: {message}")]
    Nats {
        /// Description of the NATS failure.
        message: String,
    },

    /// Creature seeding failed.
    #[error("spawn error: {message}")]
    Spawn {
        /// Description of the spawn failure.
        message: String,
    },
}

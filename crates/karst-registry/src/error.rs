//! Error types for registry loading and validation.
//!
//! All registry failures happen at load time; once a [`StatRegistry`]
//! exists it cannot fail. Runtime lookups signal "not found" with
//! [`Option`] instead.
//!
//! [`StatRegistry`]: crate::registry::StatRegistry

/// Errors that can occur while loading or validating the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Failed to read a data file from disk.
    #[error("failed to read data file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse data YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Two stat definitions share an identifier.
    #[error("duplicate stat definition: {id}")]
    DuplicateStat {
        /// The identifier that appears more than once.
        id: String,
    },

    /// A stat definition's minimum exceeds its maximum.
    #[error("invalid bounds for stat {id}: min {min} > max {max}")]
    InvalidBounds {
        /// The offending stat identifier.
        id: String,
        /// The declared minimum.
        min: i64,
        /// The declared maximum.
        max: i64,
    },

    /// Two creature templates share an identifier.
    #[error("duplicate creature template: {id}")]
    DuplicateCreature {
        /// The identifier that appears more than once.
        id: String,
    },

    /// A creature template references a stat with no definition.
    #[error("creature {creature} references unknown stat {stat}")]
    UnknownTemplateStat {
        /// The template carrying the bad reference.
        creature: String,
        /// The unresolved stat identifier.
        stat: String,
    },
}

impl From<serde_yml::Error> for RegistryError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

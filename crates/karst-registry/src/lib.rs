//! Stat definitions and creature templates, loaded from YAML data files.
//!
//! The registry is the read-only data-table service the stat ledger
//! consults to resolve identifiers. All identifier resolution that can be
//! done ahead of time happens here, at load: duplicate identifiers,
//! inverted bounds, and template references to undefined stats are all
//! rejected before the simulation starts. See `stat-system.md` sections 2
//! and 3 for the file formats.
//!
//! # Modules
//!
//! - [`registry`] -- The [`StatRegistry`] container and its loaders
//! - [`error`] -- Load-time and validation errors

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::StatRegistry;

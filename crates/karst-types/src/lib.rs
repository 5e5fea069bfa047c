//! Shared type definitions for the Karst simulation.
//!
//! This crate is the single source of truth for the data types used across
//! the Karst workspace: entity identifiers, stat definitions, and creature
//! templates. It carries no behavior beyond construction, clamping, and
//! serialization.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for entity identifiers
//! - [`stat`] -- Stat definitions with inclusive bounds
//! - [`template`] -- Creature templates carrying initial stat tables

pub mod ids;
pub mod stat;
pub mod template;

// Re-export all public types at crate root for convenience.
pub use ids::EntityId;
pub use stat::StatDefinition;
pub use template::CreatureTemplate;

//! Creature templates: archetypes that seed new entities.
//!
//! A [`CreatureTemplate`] names a creature kind and carries its
//! initial-values table -- the stats a freshly spawned entity starts with.
//! Templates are authored in `data/creatures.yaml`; see `stat-system.md`
//! section 3.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A creature archetype with its initial stat table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    /// Template identifier, e.g. `"gloom-rat"`.
    pub id: String,

    /// Display name for logs and observers.
    #[serde(default)]
    pub name: String,

    /// Stat identifier to initial value. Every key must resolve to a
    /// stat definition; the registry checks this at load time.
    #[serde(default)]
    pub stats: BTreeMap<String, i64>,
}

impl CreatureTemplate {
    /// Create a template from an identifier, name, and initial stat table.
    pub fn new(id: &str, name: &str, stats: BTreeMap<String, i64>) -> Self {
        Self {
            id: String::from(id),
            name: String::from(name),
            stats,
        }
    }
}

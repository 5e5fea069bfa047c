//! The stat/creature registry and its YAML loaders.
//!
//! Two data files feed the registry: `data/stats.yaml` (a `stats:` list of
//! definitions) and `data/creatures.yaml` (a `creatures:` list of
//! templates). Both are parsed with `serde_yml` and validated in one pass;
//! a registry that constructs successfully contains no dangling
//! references, so runtime code resolving through it only fails on
//! identifiers that never came from a data file.

use std::collections::BTreeMap;
use std::path::Path;

use karst_types::{CreatureTemplate, StatDefinition};
use serde::Deserialize;

use crate::error::RegistryError;

/// Shape of `data/stats.yaml`.
#[derive(Debug, Deserialize)]
struct StatsFile {
    /// The list of stat definitions.
    #[serde(default)]
    stats: Vec<StatDefinition>,
}

/// Shape of `data/creatures.yaml`.
#[derive(Debug, Deserialize)]
struct CreaturesFile {
    /// The list of creature templates.
    #[serde(default)]
    creatures: Vec<CreatureTemplate>,
}

/// Read-only lookup tables for stat definitions and creature templates.
///
/// Injected by reference into everything that resolves identifiers; the
/// stat service never owns or constructs one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatRegistry {
    /// Stat identifier to definition.
    stats: BTreeMap<String, StatDefinition>,
    /// Template identifier to creature template.
    creatures: BTreeMap<String, CreatureTemplate>,
}

impl StatRegistry {
    /// Load the registry from the two YAML data files.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] if either file cannot be read,
    /// [`RegistryError::Yaml`] if either file is not valid YAML, or a
    /// validation variant if the data is inconsistent.
    pub fn from_files(stats_path: &Path, creatures_path: &Path) -> Result<Self, RegistryError> {
        let stats_yaml = std::fs::read_to_string(stats_path)?;
        let creatures_yaml = std::fs::read_to_string(creatures_path)?;
        Self::parse(&stats_yaml, &creatures_yaml)
    }

    /// Parse the registry from YAML strings.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Yaml`] on malformed YAML, or a validation
    /// variant (duplicate identifier, inverted bounds, unresolved template
    /// reference) if the data is inconsistent.
    pub fn parse(stats_yaml: &str, creatures_yaml: &str) -> Result<Self, RegistryError> {
        let stats_file: StatsFile = serde_yml::from_str(stats_yaml)?;
        let creatures_file: CreaturesFile = serde_yml::from_str(creatures_yaml)?;
        Self::build(stats_file.stats, creatures_file.creatures)
    }

    /// Validate and index parsed definitions and templates.
    fn build(
        defs: Vec<StatDefinition>,
        templates: Vec<CreatureTemplate>,
    ) -> Result<Self, RegistryError> {
        let mut stats: BTreeMap<String, StatDefinition> = BTreeMap::new();
        for def in defs {
            if def.min > def.max {
                return Err(RegistryError::InvalidBounds {
                    id: def.id,
                    min: def.min,
                    max: def.max,
                });
            }
            if let Some(previous) = stats.insert(def.id.clone(), def) {
                return Err(RegistryError::DuplicateStat { id: previous.id });
            }
        }

        let mut creatures: BTreeMap<String, CreatureTemplate> = BTreeMap::new();
        for template in templates {
            // Every initial-table key must resolve; this is the load-time
            // half of the ledger invariant.
            for stat_id in template.stats.keys() {
                if !stats.contains_key(stat_id) {
                    return Err(RegistryError::UnknownTemplateStat {
                        creature: template.id,
                        stat: stat_id.clone(),
                    });
                }
            }
            if let Some(previous) = creatures.insert(template.id.clone(), template) {
                return Err(RegistryError::DuplicateCreature { id: previous.id });
            }
        }

        Ok(Self { stats, creatures })
    }

    /// Look up a stat definition by identifier.
    pub fn stat(&self, id: &str) -> Option<&StatDefinition> {
        self.stats.get(id)
    }

    /// Look up a creature template by identifier.
    pub fn creature(&self, id: &str) -> Option<&CreatureTemplate> {
        self.creatures.get(id)
    }

    /// Iterate all stat definitions in identifier order.
    pub fn stats(&self) -> impl Iterator<Item = &StatDefinition> {
        self.stats.values()
    }

    /// Iterate all creature templates in identifier order.
    pub fn creatures(&self) -> impl Iterator<Item = &CreatureTemplate> {
        self.creatures.values()
    }

    /// Number of stat definitions.
    pub fn stat_count(&self) -> usize {
        self.stats.len()
    }

    /// Number of creature templates.
    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }
}

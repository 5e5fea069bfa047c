//! Stat definitions: the registry-supplied metadata for a named stat.
//!
//! A [`StatDefinition`] pins the identifier and the inclusive value range
//! for one stat. Definitions are authored in `data/stats.yaml` and loaded
//! by the registry; at runtime they are read-only. See `stat-system.md`
//! section 2 for the authoring format.

use serde::{Deserialize, Serialize};

/// Registry-supplied metadata for a single named stat.
///
/// Bounds are inclusive. Every value stored in a stat ledger under this
/// definition's identifier lies within `[min, max]` after mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDefinition {
    /// Stat identifier, e.g. `"health"` or `"strength"`.
    pub id: String,

    /// Inclusive minimum value.
    #[serde(default = "default_min")]
    pub min: i64,

    /// Inclusive maximum value.
    #[serde(default = "default_max")]
    pub max: i64,
}

impl StatDefinition {
    /// Create a definition with explicit bounds.
    pub fn new(id: &str, min: i64, max: i64) -> Self {
        Self {
            id: String::from(id),
            min,
            max,
        }
    }

    /// Pin a value to this definition's inclusive range.
    ///
    /// Total for any pair of bounds; if the bounds are inverted (a shape
    /// the registry rejects at load) the minimum wins.
    #[must_use]
    pub const fn clamp(&self, value: i64) -> i64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

const fn default_min() -> i64 {
    0
}

const fn default_max() -> i64 {
    100
}

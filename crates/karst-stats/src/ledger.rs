//! Per-entity stat storage.

use std::collections::BTreeMap;

/// Current and initial stat values for a single entity.
///
/// The `initial` table is what the entity was attached with and is only
/// read back during initialization; `values` is the live table. Keys are
/// fixed once initialization has run: [`store`](Self::store) writes
/// existing entries and never creates new ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatLedger {
    values: BTreeMap<String, i64>,
    initial: BTreeMap<String, i64>,
}

impl StatLedger {
    /// An empty ledger with no initial values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            initial: BTreeMap::new(),
        }
    }

    /// A ledger that will seed the given values on initialization.
    #[must_use]
    pub const fn from_initial(initial: BTreeMap<String, i64>) -> Self {
        Self {
            values: BTreeMap::new(),
            initial,
        }
    }

    /// Current value of a stat, if the entry exists.
    pub fn value(&self, stat_id: &str) -> Option<i64> {
        self.values.get(stat_id).copied()
    }

    /// Whether the ledger holds an entry for this stat.
    pub fn contains(&self, stat_id: &str) -> bool {
        self.values.contains_key(stat_id)
    }

    /// The live value table, keyed by stat identifier.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, i64> {
        &self.values
    }

    /// The initial value table the ledger was attached with.
    #[must_use]
    pub const fn initial_values(&self) -> &BTreeMap<String, i64> {
        &self.initial
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the ledger has no live entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Create the entry for a stat with a value of zero.
    pub(crate) fn seed_zero(&mut self, stat_id: &str) {
        self.values.insert(stat_id.to_owned(), 0);
    }

    /// Overwrite an existing entry. Absent entries are left absent.
    pub(crate) fn store(&mut self, stat_id: &str, value: i64) {
        if let Some(slot) = self.values.get_mut(stat_id) {
            *slot = value;
        }
    }
}

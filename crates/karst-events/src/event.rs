//! The stat change domain event.

use karst_types::{EntityId, StatDefinition};
use serde::{Deserialize, Serialize};

/// Emitted once per successful stat mutation.
///
/// Carries the full definition (not just the identifier) so subscribers
/// can interpret the new value without a registry of their own. The
/// `new_value` is the value the write asked for; the stored entry is
/// that value clamped to the definition's bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChanged {
    /// The entity whose ledger changed.
    pub entity: EntityId,

    /// Definition of the stat that changed, bounds included.
    pub definition: StatDefinition,

    /// Stored value before the mutation.
    pub old_value: i64,

    /// Requested value of the mutation, before clamping.
    pub new_value: i64,
}

impl StatChanged {
    /// Signed change the mutation requested, saturating at the `i64`
    /// limits.
    #[must_use]
    pub const fn delta(&self) -> i64 {
        self.new_value.saturating_sub(self.old_value)
    }
}

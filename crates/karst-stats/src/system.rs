//! The stat mutation service.
//!
//! Every write funnels through [`StatsSystem::set_stat`]: clamp to the
//! definition's bounds, store, mark the entity changed, publish a
//! [`StatChanged`]. The identifier-based variants resolve against the
//! injected [`StatRegistry`] and are the only place an unknown
//! identifier is reported; everything else that cannot proceed (no
//! ledger, no entry) is a silent no-op so simulation code can call in
//! without guarding.

use std::collections::{BTreeMap, BTreeSet};

use karst_events::{StatChanged, StatEventBus};
use karst_registry::StatRegistry;
use karst_types::{EntityId, StatDefinition};
use tracing::error;

use crate::ledger::StatLedger;

/// Owner of all stat ledgers and the only writer to them.
#[derive(Debug)]
pub struct StatsSystem {
    /// One ledger per attached entity.
    ledgers: BTreeMap<EntityId, StatLedger>,
    /// Entities with at least one write since the last drain.
    dirty: BTreeSet<EntityId>,
    /// Where change events are published.
    bus: StatEventBus,
}

impl StatsSystem {
    // ------------------------------------------------------------------
    // Construction and ledger lifecycle
    // ------------------------------------------------------------------

    /// A system with no entities that publishes changes on `bus`.
    #[must_use]
    pub const fn new(bus: StatEventBus) -> Self {
        Self {
            ledgers: BTreeMap::new(),
            dirty: BTreeSet::new(),
            bus,
        }
    }

    /// The event bus this system publishes on.
    #[must_use]
    pub const fn bus(&self) -> &StatEventBus {
        &self.bus
    }

    /// Attach a fresh ledger for `entity`, replacing any existing one.
    ///
    /// The `initial` table is applied by [`initialize`](Self::initialize);
    /// until then the ledger has no live entries.
    pub fn attach_ledger(&mut self, entity: EntityId, initial: BTreeMap<String, i64>) {
        self.ledgers.insert(entity, StatLedger::from_initial(initial));
    }

    /// Remove the entity's ledger, returning it if one was attached.
    pub fn detach_ledger(&mut self, entity: EntityId) -> Option<StatLedger> {
        self.dirty.remove(&entity);
        self.ledgers.remove(&entity)
    }

    /// Whether the entity currently has a ledger.
    pub fn has_ledger(&self, entity: EntityId) -> bool {
        self.ledgers.contains_key(&entity)
    }

    /// The entity's ledger, if attached.
    pub fn ledger(&self, entity: EntityId) -> Option<&StatLedger> {
        self.ledgers.get(&entity)
    }

    /// Seed the entity's ledger from its initial table.
    ///
    /// Each initial key gets an entry at zero, then the initial value is
    /// written through [`set_stat_by_id`](Self::set_stat_by_id), so it is
    /// clamped and published like any other write. A key with no stat
    /// definition is reported there and its entry stays at zero. The
    /// entity is marked changed even when the table is empty. Does
    /// nothing if no ledger is attached.
    pub fn initialize(&mut self, entity: EntityId, registry: &StatRegistry) {
        let Some(ledger) = self.ledgers.get_mut(&entity) else {
            return;
        };
        let seeds: Vec<(String, i64)> = ledger
            .initial_values()
            .iter()
            .map(|(stat_id, value)| (stat_id.clone(), *value))
            .collect();
        for (stat_id, _) in &seeds {
            ledger.seed_zero(stat_id);
        }
        for (stat_id, value) in seeds {
            self.set_stat_by_id(entity, registry, &stat_id, value);
        }
        self.dirty.insert(entity);
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Set a stat to `value`, clamped to the definition's bounds.
    ///
    /// Does nothing if the entity has no ledger or the ledger has no
    /// entry for this stat. Otherwise stores the clamped value, marks the
    /// entity changed and publishes a [`StatChanged`] carrying the old
    /// and the requested value. Only the stored entry is clamped;
    /// subscribers see the requested value even when it lands outside
    /// the bounds.
    pub fn set_stat(&mut self, entity: EntityId, definition: &StatDefinition, value: i64) {
        let Some(ledger) = self.ledgers.get_mut(&entity) else {
            return;
        };
        let Some(old_value) = ledger.value(&definition.id) else {
            return;
        };
        ledger.store(&definition.id, definition.clamp(value));
        self.dirty.insert(entity);
        self.bus.publish(&StatChanged {
            entity,
            definition: definition.clone(),
            old_value,
            new_value: value,
        });
    }

    /// [`set_stat`](Self::set_stat) with the definition resolved from the
    /// registry. The ledger check runs before the registry lookup, so a
    /// missing ledger stays silent; past it, an identifier with no
    /// definition is logged and dropped.
    pub fn set_stat_by_id(
        &mut self,
        entity: EntityId,
        registry: &StatRegistry,
        stat_id: &str,
        value: i64,
    ) {
        if !self.ledgers.contains_key(&entity) {
            return;
        }
        let Some(definition) = registry.stat(stat_id) else {
            error!(stat = stat_id, "no stat definition for identifier");
            return;
        };
        self.set_stat(entity, definition, value);
    }

    /// Add `delta` to the current value, saturating at the integer
    /// extremes, then set the result.
    ///
    /// Does nothing if the entity has no ledger or no entry for this
    /// stat.
    pub fn modify_stat(&mut self, entity: EntityId, definition: &StatDefinition, delta: i64) {
        let Some(current) = self
            .ledgers
            .get(&entity)
            .and_then(|ledger| ledger.value(&definition.id))
        else {
            return;
        };
        self.set_stat(entity, definition, current.saturating_add(delta));
    }

    /// [`modify_stat`](Self::modify_stat) with the definition resolved
    /// from the registry. The current value is read before resolution, so
    /// a missing entry stays a silent no-op and only a present entry with
    /// an unknown identifier is logged.
    pub fn modify_stat_by_id(
        &mut self,
        entity: EntityId,
        registry: &StatRegistry,
        stat_id: &str,
        delta: i64,
    ) {
        let Some(current) = self
            .ledgers
            .get(&entity)
            .and_then(|ledger| ledger.value(stat_id))
        else {
            return;
        };
        self.set_stat_by_id(entity, registry, stat_id, current.saturating_add(delta));
    }

    // ------------------------------------------------------------------
    // Reads and change tracking
    // ------------------------------------------------------------------

    /// Current value of a stat, or zero if the entity has no ledger or no
    /// entry for it. Never consults the registry.
    #[must_use]
    pub fn get_stat_by_id(&self, entity: EntityId, stat_id: &str) -> i64 {
        self.ledgers
            .get(&entity)
            .and_then(|ledger| ledger.value(stat_id))
            .unwrap_or(0)
    }

    /// [`get_stat_by_id`](Self::get_stat_by_id) keyed by a definition.
    #[must_use]
    pub fn get_stat(&self, entity: EntityId, definition: &StatDefinition) -> i64 {
        self.get_stat_by_id(entity, &definition.id)
    }

    /// Drain the set of entities written to since the last drain.
    pub fn take_dirty(&mut self) -> BTreeSet<EntityId> {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STATS_YAML: &str = r"
stats:
  - id: health
    min: 0
    max: 100
  - id: strength
    min: 0
    max: 10
  - id: luminance
    min: -10
    max: 10
";

    fn registry() -> StatRegistry {
        StatRegistry::parse(STATS_YAML, "").unwrap()
    }

    /// Attach and initialize an entity with the given initial values.
    fn spawned(
        system: &mut StatsSystem,
        registry: &StatRegistry,
        initial: &[(&str, i64)],
    ) -> EntityId {
        let entity = EntityId::new();
        let initial = initial
            .iter()
            .map(|(stat_id, value)| ((*stat_id).to_owned(), *value))
            .collect();
        system.attach_ledger(entity, initial);
        system.initialize(entity, registry);
        entity
    }

    #[test]
    fn set_above_max_clamps_then_modify_applies_delta() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("strength", 5)]);

        system.set_stat_by_id(entity, &registry, "strength", 15);
        assert_eq!(system.get_stat_by_id(entity, "strength"), 10);

        system.modify_stat_by_id(entity, &registry, "strength", -3);
        assert_eq!(system.get_stat_by_id(entity, "strength"), 7);
    }

    #[test]
    fn set_below_min_clamps() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("luminance", 0)]);

        system.set_stat_by_id(entity, &registry, "luminance", -25);
        assert_eq!(system.get_stat_by_id(entity, "luminance"), -10);
    }

    #[test]
    fn get_without_ledger_returns_zero() {
        let system = StatsSystem::new(StatEventBus::new());
        assert_eq!(system.get_stat_by_id(EntityId::new(), "strength"), 0);
    }

    #[test]
    fn get_missing_entry_returns_zero() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[]);
        assert_eq!(system.get_stat_by_id(entity, "strength"), 0);
    }

    #[test]
    fn set_without_ledger_is_ignored() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let mut events = system.bus().subscribe();

        system.set_stat_by_id(EntityId::new(), &registry, "strength", 5);

        assert!(events.try_recv().is_err());
        assert!(system.take_dirty().is_empty());
    }

    #[test]
    fn set_with_unknown_identifier_is_ignored() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("strength", 5)]);
        let mut events = system.bus().subscribe();

        system.set_stat_by_id(entity, &registry, "charisma", 5);

        assert!(events.try_recv().is_err());
        assert_eq!(system.get_stat_by_id(entity, "charisma"), 0);
        assert_eq!(system.get_stat_by_id(entity, "strength"), 5);
    }

    #[test]
    fn set_unknown_identifier_without_ledger_is_ignored() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let mut events = system.bus().subscribe();

        system.set_stat_by_id(EntityId::new(), &registry, "charisma", 5);

        assert!(events.try_recv().is_err());
        assert!(system.take_dirty().is_empty());
    }

    #[test]
    fn set_on_missing_entry_is_ignored() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[]);
        system.take_dirty();
        let mut events = system.bus().subscribe();

        let strength = registry.stat("strength").unwrap().clone();
        system.set_stat(entity, &strength, 5);

        assert!(events.try_recv().is_err());
        assert!(system.take_dirty().is_empty());
        assert_eq!(system.get_stat(entity, &strength), 0);
    }

    #[test]
    fn set_emits_change_event_with_old_and_new() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("strength", 5)]);
        let mut events = system.bus().subscribe();

        system.set_stat_by_id(entity, &registry, "strength", 8);

        let event = events.try_recv().unwrap();
        assert_eq!(event.entity, entity);
        assert_eq!(event.definition.id, "strength");
        assert_eq!(event.old_value, 5);
        assert_eq!(event.new_value, 8);
        assert_eq!(event.delta(), 3);
    }

    #[test]
    fn event_carries_the_requested_value_not_the_stored() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("strength", 5)]);
        let mut events = system.bus().subscribe();

        system.set_stat_by_id(entity, &registry, "strength", 15);

        let event = events.try_recv().unwrap();
        assert_eq!(event.old_value, 5);
        assert_eq!(event.new_value, 15);
        assert_eq!(system.get_stat_by_id(entity, "strength"), 10);
    }

    #[test]
    fn set_to_current_value_still_emits() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("strength", 5)]);
        let mut events = system.bus().subscribe();

        system.set_stat_by_id(entity, &registry, "strength", 5);

        let event = events.try_recv().unwrap();
        assert_eq!(event.old_value, 5);
        assert_eq!(event.new_value, 5);
    }

    #[test]
    fn modify_without_ledger_is_ignored() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let mut events = system.bus().subscribe();

        system.modify_stat_by_id(EntityId::new(), &registry, "strength", 3);

        assert!(events.try_recv().is_err());
        assert!(system.take_dirty().is_empty());
    }

    #[test]
    fn modify_on_missing_entry_is_ignored() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[]);
        let mut events = system.bus().subscribe();

        let strength = registry.stat("strength").unwrap().clone();
        system.modify_stat(entity, &strength, 3);

        assert!(events.try_recv().is_err());
        assert_eq!(system.get_stat(entity, &strength), 0);
    }

    #[test]
    fn modify_saturates_at_integer_extremes() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("strength", 5)]);

        system.modify_stat_by_id(entity, &registry, "strength", i64::MAX);
        assert_eq!(system.get_stat_by_id(entity, "strength"), 10);

        system.modify_stat_by_id(entity, &registry, "strength", i64::MIN);
        assert_eq!(system.get_stat_by_id(entity, "strength"), 0);
    }

    #[test]
    fn initialize_seeds_entries_and_clamps_initial_values() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(
            &mut system,
            &registry,
            &[("health", 150), ("luminance", -25)],
        );

        assert_eq!(system.get_stat_by_id(entity, "health"), 100);
        assert_eq!(system.get_stat_by_id(entity, "luminance"), -10);
        assert_eq!(system.ledger(entity).map(StatLedger::len), Some(2));
    }

    #[test]
    fn initialize_emits_one_event_per_known_entry() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let mut events = system.bus().subscribe();

        let entity = EntityId::new();
        system.attach_ledger(
            entity,
            BTreeMap::from([("health".to_owned(), 30), ("strength".to_owned(), 2)]),
        );
        system.initialize(entity, &registry);

        let first = events.try_recv().unwrap();
        assert_eq!(first.definition.id, "health");
        assert_eq!(first.old_value, 0);
        assert_eq!(first.new_value, 30);

        let second = events.try_recv().unwrap();
        assert_eq!(second.definition.id, "strength");
        assert_eq!(second.old_value, 0);
        assert_eq!(second.new_value, 2);

        assert!(events.try_recv().is_err());
    }

    #[test]
    fn initialize_keeps_zero_for_unknown_initial_key() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let mut events = system.bus().subscribe();

        let entity = EntityId::new();
        system.attach_ledger(entity, BTreeMap::from([("bogus".to_owned(), 7)]));
        system.initialize(entity, &registry);

        assert!(events.try_recv().is_err());
        assert!(system.ledger(entity).is_some_and(|l| l.contains("bogus")));
        assert_eq!(system.get_stat_by_id(entity, "bogus"), 0);
        assert!(system.take_dirty().contains(&entity));
    }

    #[test]
    fn initialize_without_ledger_is_ignored() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        system.initialize(EntityId::new(), &registry);
        assert!(system.take_dirty().is_empty());
    }

    #[test]
    fn take_dirty_drains_the_changed_set() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("strength", 5)]);

        assert!(system.take_dirty().contains(&entity));
        assert!(system.take_dirty().is_empty());

        system.set_stat_by_id(entity, &registry, "strength", 6);
        assert!(system.take_dirty().contains(&entity));
        assert!(system.take_dirty().is_empty());
    }

    #[test]
    fn attach_replaces_existing_ledger() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("strength", 5)]);

        system.attach_ledger(entity, BTreeMap::from([("health".to_owned(), 3)]));
        system.initialize(entity, &registry);

        assert_eq!(system.get_stat_by_id(entity, "strength"), 0);
        assert_eq!(system.get_stat_by_id(entity, "health"), 3);
    }

    #[test]
    fn detach_removes_ledger_and_pending_changes() {
        let registry = registry();
        let mut system = StatsSystem::new(StatEventBus::new());
        let entity = spawned(&mut system, &registry, &[("strength", 5)]);
        assert!(system.has_ledger(entity));

        let ledger = system.detach_ledger(entity);
        assert!(ledger.is_some_and(|l| l.value("strength") == Some(5)));
        assert!(!system.has_ledger(entity));
        assert!(system.take_dirty().is_empty());
        assert_eq!(system.get_stat_by_id(entity, "strength"), 0);

        assert!(system.detach_ledger(entity).is_none());

        let mut events = system.bus().subscribe();
        system.set_stat_by_id(entity, &registry, "strength", 5);
        assert!(events.try_recv().is_err());
    }
}

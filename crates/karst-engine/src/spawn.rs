//! Creature seeding for populating the cave at engine start.
//!
//! The spawn table in `karst-config.yaml` names creature templates and
//! counts. Each spawned creature gets a fresh entity ID and a ledger
//! attached from its template's stat table, then the ledger is
//! initialized so the seed values are clamped and published like any
//! other write.

use karst_registry::StatRegistry;
use karst_stats::StatsSystem;
use karst_types::EntityId;
use tracing::info;

use crate::config::SpawnEntry;
use crate::error::EngineError;

/// Spawn `count` creatures from each template in the table.
///
/// Returns the IDs of everything spawned, in spawn order.
///
/// # Errors
///
/// Returns [`EngineError::Spawn`] if an entry names a template the
/// registry does not have.
pub fn spawn_creatures(
    entries: &[SpawnEntry],
    registry: &StatRegistry,
    stats: &mut StatsSystem,
) -> Result<Vec<EntityId>, EngineError> {
    let mut spawned = Vec::new();
    for entry in entries {
        let Some(template) = registry.creature(&entry.template) else {
            return Err(EngineError::Spawn {
                message: format!("no creature template named {}", entry.template),
            });
        };
        for _ in 0..entry.count {
            let entity = EntityId::new();
            stats.attach_ledger(entity, template.stats.clone());
            stats.initialize(entity, registry);
            info!(
                entity = %entity,
                template = entry.template,
                name = template.name,
                "creature spawned"
            );
            spawned.push(entity);
        }
    }
    Ok(spawned)
}

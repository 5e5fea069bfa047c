//! Karst engine binary.
//!
//! This is the main entry point that wires together the stat registry,
//! the stat service, NATS replication, and the tick loop. It loads
//! configuration, seeds the cave with creatures, and applies per-tick
//! upkeep until a shutdown signal arrives.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `karst-config.yaml`
//! 3. Load the stat registry from the data files
//! 4. Create the event bus and stat service
//! 5. Connect to NATS and start the replication forwarder
//! 6. Seed creatures from the spawn table
//! 7. Run the tick loop
//! 8. Drain the forwarder and shut down

mod config;
mod error;
mod spawn;

use std::path::Path;
use std::time::Duration;

use karst_events::StatEventBus;
use karst_registry::StatRegistry;
use karst_replication::{NatsClient, spawn_forwarder};
use karst_stats::StatsSystem;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::KarstConfig;
use crate::error::EngineError;

/// Application entry point for the Karst engine.
///
/// Initializes all subsystems and runs the tick loop. Returns an error
/// code on failure.
///
/// # Errors
///
/// Returns an error if any initialization step fails.
#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("karst-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = config.world.name,
        tick_interval_ms = config.world.tick_interval_ms,
        "Configuration loaded"
    );

    // 3. Load the stat registry.
    let registry = load_registry(&config)?;
    info!(
        stat_count = registry.stat_count(),
        creature_count = registry.creature_count(),
        "Stat registry loaded"
    );

    // 4. Create the event bus and stat service.
    let bus = StatEventBus::new();
    let mut stats = StatsSystem::new(bus.clone());
    info!("Stat service initialized");

    // 5. Connect to NATS and start the replication forwarder. The
    //    forwarder subscribes before any write happens, so the seeding
    //    events below reach the wire too.
    let nats_url = &config.infrastructure.nats_url;
    info!(nats_url = nats_url, "Connecting to NATS");
    let client = NatsClient::connect(nats_url)
        .await
        .map_err(|e| EngineError::Nats {
            message: format!("{e}"),
        })?;
    let forwarder = spawn_forwarder(&bus, client);
    info!("Stat replication forwarder started");

    // 6. Seed creatures from the spawn table.
    let creatures = spawn::spawn_creatures(&config.spawn, &registry, &mut stats)?;
    info!(creature_count = creatures.len(), "Creatures seeded");

    // 7. Tick loop: apply upkeep, then drain the changed set.
    let tick_interval = Duration::from_millis(config.world.tick_interval_ms.max(1));
    let mut ticker = tokio::time::interval(tick_interval);
    let mut tick: u64 = 0;
    info!(
        upkeep_enabled = config.upkeep.enabled,
        upkeep_stat = config.upkeep.stat,
        "Entering tick loop"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick = tick.saturating_add(1);
                if config.upkeep.enabled {
                    for entity in &creatures {
                        stats.modify_stat_by_id(
                            *entity,
                            &registry,
                            &config.upkeep.stat,
                            config.upkeep.amount,
                        );
                    }
                }
                let changed = stats.take_dirty();
                if !changed.is_empty() {
                    debug!(tick = tick, changed = changed.len(), "entities changed this tick");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    // 8. Close the bus so the forwarder drains its backlog and stops.
    drop(stats);
    drop(bus);
    match tokio::time::timeout(Duration::from_secs(1), forwarder).await {
        Ok(_) => info!("replication forwarder stopped"),
        Err(_) => warn!("replication forwarder did not stop in time"),
    }

    info!(ticks = tick, "karst-engine shutdown complete");
    Ok(())
}

/// Load the engine configuration from `karst-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<KarstConfig, EngineError> {
    let config_path = Path::new("karst-config.yaml");
    if config_path.exists() {
        let config = KarstConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(KarstConfig::default())
    }
}

/// Load the stat registry from the configured data files.
fn load_registry(config: &KarstConfig) -> Result<StatRegistry, EngineError> {
    let registry = StatRegistry::from_files(
        Path::new(&config.data.stats_path),
        Path::new(&config.data.creatures_path),
    )?;
    Ok(registry)
}

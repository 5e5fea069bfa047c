//! Per-entity stat ledgers and the service that mutates them.
//!
//! The [`StatsSystem`] owns one [`StatLedger`] per entity and is the only
//! writer. All mutation goes through its set/modify operations, which
//! resolve identifiers against an injected [`karst_registry::StatRegistry`],
//! clamp to the definition's bounds and publish a
//! [`karst_events::StatChanged`] for every stored write.
//!
//! See section 4 of `docs/stat-system.md` for the mutation rules.

pub mod ledger;
pub mod system;

pub use ledger::StatLedger;
pub use system::StatsSystem;

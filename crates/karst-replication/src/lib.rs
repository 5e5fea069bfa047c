//! Replication of stat changes onto the network.
//!
//! The stat service publishes [`karst_events::StatChanged`] on an
//! in-process bus and knows nothing about the wire. This crate closes the
//! gap: a [`forwarder`] task subscribes to the bus and republishes every
//! event as JSON on a NATS subject derived from the entity, so remote
//! consumers see the same stream local subscribers do.
//!
//! See section 5 of `docs/stat-system.md` for the subject scheme.

pub mod error;
pub mod forwarder;
pub mod nats;

pub use error::ReplicationError;
pub use forwarder::{forward_events, spawn_forwarder};
pub use nats::NatsClient;

//! Stat change events and the in-process notification bus.
//!
//! Every successful stat mutation produces exactly one [`StatChanged`]
//! event, published on the [`StatEventBus`]. Local observers subscribe to
//! the bus directly; the networked copy is produced by the replication
//! forwarder, which is itself just another subscriber. See
//! `stat-system.md` section 5.
//!
//! # Modules
//!
//! - [`event`] -- The [`StatChanged`] domain event
//! - [`bus`] -- Broadcast channel wrapper for publishing and subscribing

pub mod bus;
pub mod event;

pub use bus::StatEventBus;
pub use event::StatChanged;

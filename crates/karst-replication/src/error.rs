//! Error types for the replication layer.

use thiserror::Error;

/// Errors that can occur while replicating stat changes.
#[derive(Debug, Error)]
pub enum ReplicationError {
    /// NATS connection or publish failure.
    #[error("NATS error: {0}")]
    Nats(String),

    /// An event payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(String),
}

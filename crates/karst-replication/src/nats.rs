//! NATS pub/sub integration for stat change replication.
//!
//! Every stored stat write is republished as JSON on a subject matching
//! `karst.stats.changed.{entity_id}`, so consumers can subscribe to a
//! single entity or to `karst.stats.changed.>` for the whole stream.

use karst_events::StatChanged;
use tracing::{debug, info};

use crate::error::ReplicationError;

/// NATS client wrapper for stat replication.
///
/// Manages a single NATS connection and publishes stat change payloads on
/// per-entity subjects.
pub struct NatsClient {
    client: async_nats::Client,
}

impl NatsClient {
    /// Connect to a NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::Nats`] if the connection cannot be
    /// established.
    pub async fn connect(url: &str) -> Result<Self, ReplicationError> {
        info!(url = url, "connecting to NATS server");
        let client = async_nats::connect(url)
            .await
            .map_err(|e| ReplicationError::Nats(format!("failed to connect to {url}: {e}")))?;
        info!("NATS connection established");
        Ok(Self { client })
    }

    /// The subject a change for this event's entity is published on.
    #[must_use]
    pub fn subject_for(event: &StatChanged) -> String {
        format!("karst.stats.changed.{}", event.entity)
    }

    /// Publish a stat change on its entity's subject.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::Serialize`] if the payload cannot be
    /// serialized, or [`ReplicationError::Nats`] if publishing fails.
    pub async fn publish_change(&self, event: &StatChanged) -> Result<(), ReplicationError> {
        let subject = Self::subject_for(event);
        let payload = serde_json::to_vec(event).map_err(|e| {
            ReplicationError::Serialize(format!("failed to serialize stat change: {e}"))
        })?;
        debug!(
            subject = subject,
            entity = %event.entity,
            stat = %event.definition.id,
            "publishing stat change"
        );
        self.client
            .publish(subject.clone(), payload.into())
            .await
            .map_err(|e| ReplicationError::Nats(format!("failed to publish to {subject}: {e}")))?;
        Ok(())
    }

    /// Flush all pending messages to the NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::Nats`] if the flush operation fails.
    pub async fn flush(&self) -> Result<(), ReplicationError> {
        self.client
            .flush()
            .await
            .map_err(|e| ReplicationError::Nats(format!("flush failed: {e}")))
    }
}

impl std::fmt::Debug for NatsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsClient")
            .field("connected", &true)
            .finish()
    }
}

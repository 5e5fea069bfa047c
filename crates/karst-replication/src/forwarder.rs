//! Background task bridging the in-process event bus onto NATS.

use karst_events::{StatChanged, StatEventBus};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::nats::NatsClient;

/// Forward every event from `receiver` to NATS until the bus closes.
///
/// Publish failures are logged and skipped; replication must never stall
/// the stream. A lagged receiver (the bus outpaced this task) is also
/// logged, with the number of dropped events.
pub async fn forward_events(mut receiver: broadcast::Receiver<StatChanged>, client: NatsClient) {
    loop {
        match receiver.recv().await {
            Ok(event) => {
                if let Err(e) = client.publish_change(&event).await {
                    warn!(error = %e, entity = %event.entity, "failed to replicate stat change");
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped = skipped, "stat change forwarder lagged behind the bus");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("stat change bus closed, stopping forwarder");
                break;
            }
        }
    }
}

/// Subscribe to the bus and forward all future events on a spawned task.
///
/// The task runs until every publisher of the bus has been dropped.
pub fn spawn_forwarder(bus: &StatEventBus, client: NatsClient) -> JoinHandle<()> {
    tokio::spawn(forward_events(bus.subscribe(), client))
}

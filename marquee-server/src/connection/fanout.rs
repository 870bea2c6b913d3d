use crate::connection::ConnectionHandle;
use crate::error::PeerUnreachable;
use dashmap::DashMap;
use marquee_core::{ParticipantId, StatusUpdate};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Delivers screen connectivity events to every admin observer, isolating
/// each observer's failures from the rest of the pass.
pub struct StatusFanout {
    observers: DashMap<ParticipantId, Arc<dyn ConnectionHandle>>,
}

impl StatusFanout {
    pub fn new() -> Self {
        Self {
            observers: DashMap::new(),
        }
    }

    /// Send the full snapshot to the new observer, then add it to the set.
    /// An observer that cannot take the snapshot is never added.
    pub async fn subscribe(
        &self,
        id: ParticipantId,
        handle: Arc<dyn ConnectionHandle>,
        snapshot: &[StatusUpdate],
    ) -> Result<(), PeerUnreachable> {
        for update in snapshot {
            match serde_json::to_string(update) {
                Ok(text) => handle.send(&text).await?,
                Err(e) => error!("Failed to serialize status snapshot entry: {}", e),
            }
        }

        self.observers.insert(id, handle);
        debug!(%id, "admin observer subscribed");
        Ok(())
    }

    pub fn unsubscribe(&self, id: &ParticipantId) {
        if self.observers.remove(id).is_some() {
            debug!(%id, "admin observer unsubscribed");
        }
    }

    /// Deliver one event to every current observer. Failed observers are
    /// collected during the pass and removed only after it completes.
    pub async fn publish(&self, update: StatusUpdate) {
        let text = match serde_json::to_string(&update) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize status update: {}", e);
                return;
            }
        };

        let targets: Vec<(ParticipantId, Arc<dyn ConnectionHandle>)> = self
            .observers
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();

        let mut failed = Vec::new();
        for (id, handle) in targets {
            if handle.send(&text).await.is_err() {
                failed.push(id);
            }
        }

        for id in failed {
            warn!(%id, "dropping unreachable admin observer");
            self.observers.remove(&id);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl Default for StatusFanout {
    fn default() -> Self {
        Self::new()
    }
}

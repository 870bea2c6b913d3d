use crate::connection::{ConnectionHandle, StatusFanout};
use crate::directory::ScreenDirectory;
use crate::error::RegisterError;
use marquee_core::{ScreenCommand, ScreenId, StatusUpdate};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Tracks which screens hold a live control connection and pushes commands to
/// them. The id set is fixed at construction from the directory; connection
/// state only changes through `register`/`deregister`.
///
/// Each screen has its own slot mutex, held across both the state flip and
/// the status-event enqueue: observers see a screen's events in the order
/// they were generated, and a disconnect racing a reconnect cannot deliver
/// inverted. Different screens never contend with each other.
pub struct ConnectionManager {
    directory: Arc<dyn ScreenDirectory>,
    screens: HashMap<ScreenId, Mutex<Option<Arc<dyn ConnectionHandle>>>>,
    fanout: Arc<StatusFanout>,
}

impl ConnectionManager {
    pub fn new(directory: Arc<dyn ScreenDirectory>, fanout: Arc<StatusFanout>) -> Self {
        let screens = directory
            .list()
            .iter()
            .map(|screen| (screen.id, Mutex::new(None)))
            .collect();

        Self {
            directory,
            screens,
            fanout,
        }
    }

    /// Accept a screen's control connection. A screen outside the configured
    /// set, or one that is already connected, is turned away: the incoming
    /// handle is closed with the reason and any existing connection is left
    /// untouched.
    pub async fn register(
        &self,
        id: ScreenId,
        handle: Arc<dyn ConnectionHandle>,
    ) -> Result<(), RegisterError> {
        let Some(slot) = self.screens.get(&id) else {
            warn!(%id, "rejecting connection for unconfigured screen");
            handle.close("unknown screen id").await;
            return Err(RegisterError::UnknownScreenId(id));
        };

        {
            let mut connection = slot.lock().await;
            if connection.is_none() {
                *connection = Some(Arc::clone(&handle));
                info!(%id, "screen connected");
                self.fanout.publish(StatusUpdate::new(id, true)).await;
                return Ok(());
            }
        }

        warn!(%id, "rejecting duplicate connection for screen");
        handle.close("screen already connected").await;
        Err(RegisterError::DuplicateConnection(id))
    }

    /// Release a screen's connection. Idempotent: a second call finds nothing
    /// to remove and emits no second event.
    pub async fn deregister(&self, id: ScreenId) {
        let Some(slot) = self.screens.get(&id) else {
            return;
        };

        let mut connection = slot.lock().await;
        if connection.take().is_some() {
            warn!(%id, "screen disconnected");
            self.fanout.publish(StatusUpdate::new(id, false)).await;
        }
    }

    /// Push a command to one screen, fire-and-forget. A screen without a live
    /// connection is only logged; an unreachable one is pruned. The control
    /// plane tolerates absence, the screen picks up fresh state on reconnect.
    pub async fn send_command(&self, id: ScreenId, command: &ScreenCommand) {
        // Snapshot the handle first; the slot is never held across the send,
        // so a slow screen cannot block registry mutation.
        let handle = match self.screens.get(&id) {
            Some(slot) => slot.lock().await.clone(),
            None => None,
        };

        let Some(handle) = handle else {
            warn!(%id, "no active connection for screen");
            return;
        };

        let text = command.to_wire().to_string();
        info!(%id, message = %text, "notifying screen");

        if handle.send(&text).await.is_err() {
            warn!(%id, "screen unreachable, dropping its connection");
            self.deregister(id).await;
        }
    }

    /// Push a command to every connected screen. The target set is snapshotted
    /// before any I/O so one slow screen never blocks registry mutation.
    pub async fn broadcast_command(&self, command: &ScreenCommand) {
        let mut targets = Vec::new();
        for screen in self.directory.list() {
            if self.is_connected(screen.id).await {
                targets.push(screen.id);
            }
        }

        for id in targets {
            self.send_command(id, command).await;
        }
    }

    pub async fn is_connected(&self, id: ScreenId) -> bool {
        match self.screens.get(&id) {
            Some(slot) => slot.lock().await.is_some(),
            None => false,
        }
    }

    /// Current connectivity of every configured screen, in directory order.
    pub async fn status_snapshot(&self) -> Vec<StatusUpdate> {
        let mut snapshot = Vec::new();
        for screen in self.directory.list() {
            snapshot.push(StatusUpdate::new(screen.id, self.is_connected(screen.id).await));
        }
        snapshot
    }
}

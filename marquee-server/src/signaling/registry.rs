use crate::connection::ConnectionHandle;
use crate::signaling::{Participant, RoomState};
use dashmap::DashMap;
use marquee_core::{ParticipantId, Role, SignalMessage};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Room registry and relay. Rooms are created lazily on first join and
/// removed the moment the last participant leaves. All mutation happens under
/// the room's map entry; sends happen on snapshots taken afterwards, so one
/// slow peer never holds up another room operation.
pub struct RoomRegistry {
    rooms: DashMap<String, RoomState>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Seat a broadcaster. An occupied slot is replaced, not rejected: a
    /// restarting source is authoritative, so the stale occupant is
    /// force-closed. If viewers are already waiting, the new broadcaster is
    /// told immediately so it can start negotiating.
    pub async fn join_broadcaster(
        &self,
        room: &str,
        id: ParticipantId,
        handle: Arc<dyn ConnectionHandle>,
    ) {
        let (evicted, viewers_waiting) = {
            let mut state = self.rooms.entry(room.to_string()).or_default();
            let evicted = state.set_broadcaster(Participant::new(id, Arc::clone(&handle)));
            (evicted, !state.viewers.is_empty())
        };

        if let Some(old) = evicted {
            info!(room, old = %old.id, new = %id, "broadcaster replaced");
            old.handle.close("replaced by a newer broadcaster").await;
        } else {
            info!(room, %id, "broadcaster joined");
        }

        if viewers_waiting {
            self.notify_viewer_connected(room).await;
        }
    }

    /// Append a viewer and tell the broadcaster, if present, that someone is
    /// waiting for an offer.
    pub async fn join_viewer(&self, room: &str, id: ParticipantId, handle: Arc<dyn ConnectionHandle>) {
        let added = {
            let mut state = self.rooms.entry(room.to_string()).or_default();
            state.add_viewer(Participant::new(id, handle))
        };

        if !added {
            warn!(room, %id, "viewer already present in room");
            return;
        }

        info!(room, %id, "viewer joined");
        self.notify_viewer_connected(room).await;
    }

    /// Forward a broadcaster's offer, verbatim, to every viewer currently in
    /// the room.
    pub async fn relay_offer(&self, room: &str, raw: &str) {
        self.fan_to_viewers(room, raw).await;
    }

    /// Forward a viewer's answer, verbatim, to the broadcaster.
    pub async fn relay_answer(&self, room: &str, raw: &str) {
        self.send_to_broadcaster(room, raw).await;
    }

    /// Forward an ICE candidate in whichever direction the sender's role
    /// dictates.
    pub async fn relay_candidate(&self, room: &str, from: Role, raw: &str) {
        match from {
            Role::Broadcaster => self.fan_to_viewers(room, raw).await,
            Role::Viewer => self.send_to_broadcaster(room, raw).await,
        }
    }

    /// Remove a participant on connection termination, then drop the room if
    /// it is now empty. Safe against a pre-empted broadcaster's late leave.
    pub fn leave(&self, room: &str, id: ParticipantId, role: Role) {
        let removed = match self.rooms.get_mut(room) {
            Some(mut state) => match role {
                Role::Broadcaster => state.clear_broadcaster_if(id),
                Role::Viewer => state.remove_viewer(id),
            },
            None => false,
        };

        if removed {
            debug!(room, %id, %role, "participant left");
        }

        if self.rooms.remove_if(room, |_, state| state.is_empty()).is_some() {
            info!(room, "room is empty, removing");
        }
    }

    pub fn contains_room(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn has_broadcaster(&self, room: &str) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|state| state.broadcaster.is_some())
    }

    pub fn viewer_count(&self, room: &str) -> usize {
        self.rooms.get(room).map_or(0, |state| state.viewers.len())
    }

    /// Deliver to every viewer; a failed viewer is an implicit leave and
    /// never aborts delivery to the rest. Failures are collected during the
    /// pass and pruned after it completes.
    async fn fan_to_viewers(&self, room: &str, raw: &str) {
        let viewers: Vec<Participant> = match self.rooms.get(room) {
            Some(state) => state.viewers.clone(),
            None => {
                warn!(room, "dropping relay message for unknown room");
                return;
            }
        };

        let mut failed = Vec::new();
        for viewer in viewers {
            if viewer.handle.send(raw).await.is_err() {
                failed.push(viewer.id);
            }
        }

        for id in failed {
            warn!(room, %id, "viewer unreachable, removing from room");
            self.leave(room, id, Role::Viewer);
        }
    }

    /// Deliver to the broadcaster; failure clears the slot (implicit leave).
    async fn send_to_broadcaster(&self, room: &str, raw: &str) {
        let broadcaster = self
            .rooms
            .get(room)
            .and_then(|state| state.broadcaster.clone());

        let Some(broadcaster) = broadcaster else {
            warn!(room, "dropping relay message, no broadcaster present");
            return;
        };

        if broadcaster.handle.send(raw).await.is_err() {
            warn!(room, id = %broadcaster.id, "broadcaster unreachable, clearing slot");
            self.leave(room, broadcaster.id, Role::Broadcaster);
        }
    }

    async fn notify_viewer_connected(&self, room: &str) {
        let broadcaster = self
            .rooms
            .get(room)
            .and_then(|state| state.broadcaster.clone());

        let Some(broadcaster) = broadcaster else {
            debug!(room, "no broadcaster to notify of viewer arrival");
            return;
        };

        let text = match serde_json::to_string(&SignalMessage::ViewerConnected) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize viewer-connected: {}", e);
                return;
            }
        };

        if broadcaster.handle.send(&text).await.is_err() {
            warn!(room, id = %broadcaster.id, "broadcaster unreachable, clearing slot");
            self.leave(room, broadcaster.id, Role::Broadcaster);
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use crate::connection::ConnectionHandle;
use marquee_core::ParticipantId;
use std::sync::Arc;

/// One signaling participant as stored in a room.
#[derive(Clone)]
pub(crate) struct Participant {
    pub id: ParticipantId,
    pub handle: Arc<dyn ConnectionHandle>,
}

impl Participant {
    pub fn new(id: ParticipantId, handle: Arc<dyn ConnectionHandle>) -> Self {
        Self { id, handle }
    }
}

/// Membership of one room: at most one broadcaster, viewers in join order.
#[derive(Default)]
pub(crate) struct RoomState {
    pub broadcaster: Option<Participant>,
    pub viewers: Vec<Participant>,
}

impl RoomState {
    pub fn is_empty(&self) -> bool {
        self.broadcaster.is_none() && self.viewers.is_empty()
    }

    /// Install a broadcaster, returning the previous occupant if the slot was
    /// taken. Last writer wins.
    pub fn set_broadcaster(&mut self, participant: Participant) -> Option<Participant> {
        self.broadcaster.replace(participant)
    }

    /// Clear the slot only if it still holds `id`; a pre-empted broadcaster's
    /// late leave must not evict its replacement.
    pub fn clear_broadcaster_if(&mut self, id: ParticipantId) -> bool {
        if self.broadcaster.as_ref().is_some_and(|b| b.id == id) {
            self.broadcaster = None;
            return true;
        }
        false
    }

    /// Append a viewer; each handle appears at most once in the list.
    pub fn add_viewer(&mut self, participant: Participant) -> bool {
        if self.viewers.iter().any(|v| v.id == participant.id) {
            return false;
        }
        self.viewers.push(participant);
        true
    }

    pub fn remove_viewer(&mut self, id: ParticipantId) -> bool {
        let before = self.viewers.len();
        self.viewers.retain(|v| v.id != id);
        self.viewers.len() != before
    }
}

use crate::connection::ConnectionHandle;
use crate::error::ProtocolError;
use crate::signaling::{RoleState, RoomRegistry};
use marquee_core::{ParticipantId, Role, SignalMessage};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Route one inbound signaling message through the role machine.
///
/// The first message on a connection must declare a role; anything else, or
/// unparseable traffic, is an error that must cost the sender its connection.
/// In that case room state is untouched unless the sender had already joined.
/// After the role is set, relay messages route by it and anything
/// wrong-direction is logged and dropped.
pub async fn dispatch_signal(
    registry: &RoomRegistry,
    room: &str,
    participant_id: ParticipantId,
    handle: &Arc<dyn ConnectionHandle>,
    role_state: &Mutex<RoleState>,
    text: &str,
) -> Result<(), ProtocolError> {
    let signal: SignalMessage = serde_json::from_str(text)?;

    let mut role = role_state.lock().await;
    match role.role() {
        None => match signal {
            SignalMessage::Broadcaster => {
                role.assign(Role::Broadcaster);
                registry
                    .join_broadcaster(room, participant_id, Arc::clone(handle))
                    .await;
                Ok(())
            }
            SignalMessage::Viewer => {
                role.assign(Role::Viewer);
                registry
                    .join_viewer(room, participant_id, Arc::clone(handle))
                    .await;
                Ok(())
            }
            _ => Err(ProtocolError::RoleExpected),
        },
        Some(Role::Broadcaster) => {
            match signal {
                SignalMessage::Offer { .. } => registry.relay_offer(room, text).await,
                SignalMessage::IceCandidate { .. } => {
                    registry.relay_candidate(room, Role::Broadcaster, text).await
                }
                other => {
                    warn!(%participant_id, room, ?other, "ignoring message invalid for a broadcaster")
                }
            }
            Ok(())
        }
        Some(Role::Viewer) => {
            match signal {
                SignalMessage::Answer { .. } => registry.relay_answer(room, text).await,
                SignalMessage::IceCandidate { .. } => {
                    registry.relay_candidate(room, Role::Viewer, text).await
                }
                other => {
                    warn!(%participant_id, room, ?other, "ignoring message invalid for a viewer")
                }
            }
            Ok(())
        }
    }
}

use crate::connection::ConnectionHandle;
use crate::signaling::{RoleState, dispatch_signal};
use crate::ws::{AppState, WsHandle, pump_outbound};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::StreamExt;
use marquee_core::ParticipantId;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{info, warn};

/// Signaling channel for one room: `GET /ws/signaling/{room_id}`.
pub async fn signaling_ws_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_signaling_socket(socket, room_id, state))
}

async fn handle_signaling_socket(socket: WebSocket, room_id: String, state: AppState) {
    let participant_id = ParticipantId::new();
    info!(%participant_id, room = %room_id, "signaling connection opened");

    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let handle: Arc<dyn ConnectionHandle> = Arc::new(WsHandle::new(tx));

    let mut send_task = tokio::spawn(pump_outbound(rx, ws_sender));

    // Role state outlives the receive task so the cleanup below can see
    // which side of the room this connection joined.
    let role_state = Arc::new(Mutex::new(RoleState::new()));

    let mut recv_task = tokio::spawn({
        let registry = Arc::clone(&state.rooms);
        let handle = Arc::clone(&handle);
        let role_state = Arc::clone(&role_state);
        let room = room_id.clone();

        async move {
            while let Some(Ok(msg)) = ws_receiver.next().await {
                let text = match msg {
                    Message::Text(text) => text,
                    Message::Close(_) => break,
                    _ => continue,
                };

                let result = dispatch_signal(
                    &registry,
                    &room,
                    participant_id,
                    &handle,
                    &role_state,
                    &text,
                )
                .await;

                if let Err(e) = result {
                    warn!(%participant_id, room = %room, error = %e, "closing signaling connection");
                    handle.close("protocol violation").await;
                    break;
                }
            }
        }
    });

    let sink_gone = tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
            true
        }
        _ = (&mut recv_task) => false,
    };

    // Single cleanup point: whichever way the connection ended, the room
    // sees exactly one leave, and only if a role was ever assigned.
    if let Some(role) = role_state.lock().await.role() {
        state.rooms.leave(&room_id, participant_id, role);
    }

    // The leave dropped the registry's handle clones and the receive task is
    // done with its own, so releasing ours lets the pump drain whatever is
    // still queued, a protocol-violation close frame included, and then end.
    drop(handle);
    if !sink_gone {
        let _ = send_task.await;
    }

    info!(%participant_id, room = %room_id, "signaling connection closed");
}

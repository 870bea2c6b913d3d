use crate::connection::ConnectionHandle;
use crate::ws::{AppState, WsHandle, pump_outbound};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::StreamExt;
use marquee_core::ParticipantId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Admin status channel: `GET /ws-screen-status`. Every observer first gets a
/// full connectivity snapshot, then live updates.
pub async fn status_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_status_socket(socket, state))
}

async fn handle_status_socket(socket: WebSocket, state: AppState) {
    let observer_id = ParticipantId::new();
    info!(%observer_id, "admin observer connected");

    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let handle: Arc<dyn ConnectionHandle> = Arc::new(WsHandle::new(tx));

    let mut send_task = tokio::spawn(pump_outbound(rx, ws_sender));

    let snapshot = state.manager.status_snapshot().await;
    if state
        .fanout
        .subscribe(observer_id, Arc::clone(&handle), &snapshot)
        .await
        .is_err()
    {
        warn!(%observer_id, "admin observer dropped during snapshot");
        let _ = send_task.await;
        return;
    }

    let mut recv_task = tokio::spawn(async move {
        // Observers are receive-only; drain until the peer goes away.
        while let Some(Ok(msg)) = ws_receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.fanout.unsubscribe(&observer_id);
    info!(%observer_id, "admin observer disconnected");
}

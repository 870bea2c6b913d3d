use crate::connection::ConnectionHandle;
use crate::ws::{AppState, WsHandle, pump_outbound};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::StreamExt;
use marquee_core::ScreenId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Control channel for one screen: `GET /ws/{screen_id}`.
pub async fn screen_ws_handler(
    ws: WebSocketUpgrade,
    Path(screen_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_screen_socket(socket, screen_id, state))
}

async fn handle_screen_socket(socket: WebSocket, raw_id: String, state: AppState) {
    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let handle: Arc<dyn ConnectionHandle> = Arc::new(WsHandle::new(tx));

    let mut send_task = tokio::spawn(pump_outbound(rx, ws_sender));

    let Ok(screen_id) = raw_id.parse::<ScreenId>() else {
        warn!(%raw_id, "rejecting connection with malformed screen id");
        handle.close("malformed screen id").await;
        let _ = send_task.await;
        return;
    };

    info!(%screen_id, "screen control connection opened");

    // A rejected registration already closed the incoming handle with its
    // reason; flushing the pump is all that is left. The existing connection
    // must stay untouched, so no deregister on this path.
    if state.manager.register(screen_id, Arc::clone(&handle)).await.is_err() {
        let _ = send_task.await;
        return;
    }

    let mut recv_task = tokio::spawn(async move {
        // Screens only send keep-alive frames on this channel.
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

    state.manager.deregister(screen_id).await;
    info!(%screen_id, "screen control connection closed");
}

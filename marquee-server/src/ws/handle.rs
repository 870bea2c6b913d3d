use crate::connection::ConnectionHandle;
use crate::error::PeerUnreachable;
use async_trait::async_trait;
use axum::extract::ws::{CloseFrame, Message, close_code};
use tokio::sync::mpsc;

/// Connection handle over a live WebSocket: sends enqueue onto the
/// connection's outbound pump, close enqueues a Close frame carrying the
/// reason and stops the pump.
pub struct WsHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl WsHandle {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ConnectionHandle for WsHandle {
    async fn send(&self, text: &str) -> Result<(), PeerUnreachable> {
        self.tx
            .send(Message::Text(text.to_string().into()))
            .map_err(|_| PeerUnreachable)
    }

    async fn close(&self, reason: &str) {
        let frame = CloseFrame {
            code: close_code::POLICY,
            reason: reason.to_string().into(),
        };
        let _ = self.tx.send(Message::Close(Some(frame)));
    }
}

mod handle;
mod screen;
mod signaling;
mod status;

pub use handle::*;
pub use screen::*;
pub use signaling::*;
pub use status::*;

use crate::connection::{ConnectionManager, StatusFanout};
use crate::signaling::RoomRegistry;
use axum::extract::ws::Message;
use futures::{Sink, SinkExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shared router state; registries are built once in main and injected here.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<ConnectionManager>,
    pub fanout: Arc<StatusFanout>,
    pub rooms: Arc<RoomRegistry>,
}

/// Pump queued outbound frames into the socket sink. Ends after a Close frame
/// goes out or once every sender is gone and the queue has drained, so frames
/// enqueued before teardown still reach the wire.
pub(crate) async fn pump_outbound<S>(mut rx: mpsc::UnboundedReceiver<Message>, mut sink: S)
where
    S: Sink<Message> + Unpin,
{
    while let Some(msg) = rx.recv().await {
        let closing = matches!(msg, Message::Close(_));
        if sink.send(msg).await.is_err() || closing {
            break;
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire messages on the signaling channel. Offer/answer/candidate payloads
/// beyond `type` are opaque to the relay and must survive untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalMessage {
    /// Role declaration: this connection is the room's source.
    Broadcaster,
    /// Role declaration: this connection watches the room's source.
    Viewer,
    Offer {
        #[serde(flatten)]
        payload: Map<String, Value>,
    },
    Answer {
        #[serde(flatten)]
        payload: Map<String, Value>,
    },
    IceCandidate {
        #[serde(flatten)]
        payload: Map<String, Value>,
    },
    /// Relay -> broadcaster: a viewer arrived and expects an offer.
    ViewerConnected,
}

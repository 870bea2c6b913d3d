pub mod connection;
pub mod directory;
pub mod error;
pub mod signaling;
pub mod ws;

pub use connection::{ConnectionHandle, ConnectionManager, StatusFanout};
pub use directory::{FileScreenDirectory, ScreenDirectory};
pub use error::{DirectoryError, PeerUnreachable, ProtocolError, RegisterError};
pub use signaling::{RoleState, RoomRegistry, dispatch_signal};
pub use ws::{AppState, screen_ws_handler, signaling_ws_handler, status_ws_handler};

use marquee_core::ScreenId;
use thiserror::Error;

/// A peer's outbound channel is gone. The peer is pruned from whatever
/// set or slot held it; callers never see this as a failure of their own.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("peer is unreachable")]
pub struct PeerUnreachable;

/// Why a screen control connection was turned away.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    #[error("screen {0} is not configured")]
    UnknownScreenId(ScreenId),
    #[error("screen {0} already has a live connection")]
    DuplicateConnection(ScreenId),
}

/// Signaling traffic the relay refuses to process. Closes the offending
/// connection only; rooms and other participants are untouched.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed signaling message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("expected a role declaration first")]
    RoleExpected,
}

/// Startup-only failures while loading the screen directory file.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read screens file: {0}")]
    Io(#[from] std::io::Error),
    #[error("screens file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

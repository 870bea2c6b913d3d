use crate::error::PeerUnreachable;
use async_trait::async_trait;

/// Opaque capability over one accepted connection. Registries store these and
/// nothing else; the concrete transport stays behind the trait so tests can
/// substitute their own.
#[async_trait]
pub trait ConnectionHandle: Send + Sync {
    /// Enqueue one text frame for delivery. Must not block on peer latency.
    async fn send(&self, text: &str) -> Result<(), PeerUnreachable>;

    /// Ask the peer's connection to shut down, carrying a human-readable
    /// reason. Idempotent; delivery is best-effort.
    async fn close(&self, reason: &str);
}

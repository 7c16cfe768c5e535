//! Messaging collaborator trait

/// Outbound publish channel to a host or broker
///
/// The engine only asks whether the link is up and hands over finished
/// payloads; framing and transport belong to the implementation.
pub trait MessagingClient {
    /// Connectivity bookkeeping, called once per loop iteration
    fn service(&mut self, _now_ms: u32) {}

    /// Whether the link is currently usable
    fn connected(&self) -> bool;

    /// Publish `payload` on `topic`
    ///
    /// Returns true if the message was handed to the transport.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> bool;
}

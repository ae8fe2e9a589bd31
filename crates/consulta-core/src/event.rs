//! Event bus for consulta using tokio::broadcast
//!
//! Provides a publish-subscribe mechanism for session updates.

use tokio::sync::broadcast;

/// Events emitted by the session layer
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Bearer token was replaced (login or refresh)
    TokenChanged,
    /// Session was torn down, token removed
    LoggedOut,
    /// Profile image fetch committed a result
    ProfileImageLoaded,
    /// Profile image fetch failed (message for the status line)
    ProfileImageFailed(String),
}

/// Event bus for broadcasting session events
///
/// Uses tokio::broadcast for multi-consumer support.
/// The TUI subscribes for redraw triggers and status messages.
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (64 events)
    pub fn default_capacity() -> Self {
        Self::new(64)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: SessionEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    /// Subscribe to receive events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Get current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::default_capacity();
        let mut rx = bus.subscribe();

        bus.publish(SessionEvent::TokenChanged);
        bus.publish(SessionEvent::ProfileImageFailed("timeout".to_string()));

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(event1, SessionEvent::TokenChanged));

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(event2, SessionEvent::ProfileImageFailed(msg) if msg == "timeout"));
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::default_capacity();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(SessionEvent::LoggedOut);

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();

        assert!(matches!(e1, SessionEvent::LoggedOut));
        assert!(matches!(e2, SessionEvent::LoggedOut));
    }

    #[test]
    fn test_event_bus_no_subscribers_ok() {
        let bus = EventBus::default_capacity();
        // Should not panic even with no subscribers
        bus.publish(SessionEvent::ProfileImageLoaded);
    }
}

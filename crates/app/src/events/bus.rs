//! Event Bus

use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tracing::{debug, error, warn};

use crate::events::AppEvent;

/// Producer side of the application event channel.
///
/// Publishing never waits: when the channel is full or closed the event is
/// dropped and the failure is logged.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Sender<AppEvent>,
}

impl EventBus {
    /// Create a bus with room for `buffer` pending events.
    #[must_use]
    pub fn channel(buffer: usize) -> (Self, Receiver<AppEvent>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));

        (Self { sender }, receiver)
    }

    pub fn publish(&self, event: AppEvent) {
        let kind = event.kind();

        match self.sender.try_send(event) {
            Ok(()) => debug!(event = kind, "published event"),
            Err(TrySendError::Full(_)) => {
                warn!(event = kind, "event channel is full, dropping event");
            }
            Err(TrySendError::Closed(_)) => {
                error!(event = kind, "event channel is closed, dropping event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered(email: &str) -> AppEvent {
        AppEvent::UserRegistered {
            email: email.to_string(),
            name: None,
        }
    }

    #[tokio::test]
    async fn published_events_are_received_in_order() {
        let (bus, mut receiver) = EventBus::channel(4);

        bus.publish(registered("a@example.com"));
        bus.publish(registered("b@example.com"));

        assert_eq!(receiver.recv().await, Some(registered("a@example.com")));
        assert_eq!(receiver.recv().await, Some(registered("b@example.com")));
    }

    #[tokio::test]
    async fn full_channel_drops_event() {
        let (bus, mut receiver) = EventBus::channel(1);

        bus.publish(registered("a@example.com"));
        bus.publish(registered("b@example.com"));

        drop(bus);

        assert_eq!(receiver.recv().await, Some(registered("a@example.com")));
        assert_eq!(receiver.recv().await, None);
    }

    #[test]
    fn closed_channel_does_not_panic() {
        let (bus, receiver) = EventBus::channel(1);

        drop(receiver);

        bus.publish(registered("a@example.com"));
    }
}

//! Broadcast channel for newly recorded notifications.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every recorded
//! webhook event is published through the bus, and live-stream WebSocket
//! connections subscribe to receive the events of their user.

use serde::Serialize;
use tokio::sync::broadcast;

use super::{GitHubEvent, UserId};

/// A notification together with the settings record it was appended to.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedEvent {
    /// Owner of the event.
    pub user_id: UserId,
    /// The recorded notification.
    pub event: GitHubEvent,
}

/// Broadcast bus for [`RecordedEvent`]s.
///
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers. Nothing is buffered while there are no receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<RecordedEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event.
    pub fn publish(&self, event: RecordedEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RecordedEvent> {
        self.sender.subscribe()
    }
}

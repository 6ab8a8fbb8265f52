//! The tavern event bus.
//!
//! A thin fan-out wrapper over [`tokio::sync::broadcast`]. A publish
//! clones the [`TavernEvent`] to every live subscriber and never blocks;
//! publishing with no subscribers is not an error (presentation topics
//! often have no consumer in headless runs). A receiver only observes
//! events published after it subscribed, so all subscriptions happen
//! during engine wiring, before the first publish.

use tavern_types::TavernEvent;
use tokio::sync::broadcast;

/// Capacity of the bus channel. A subscriber that falls more than this
/// many events behind observes a lag error and skips ahead.
const EVENT_CAPACITY: usize = 256;

/// Cloneable publish/subscribe handle for [`TavernEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<TavernEvent>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Register a new subscriber.
    ///
    /// The receiver sees only events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<TavernEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to every live subscriber.
    ///
    /// Returns the number of subscribers that received it; zero when
    /// nobody is listening.
    pub fn publish(&self, event: &TavernEvent) -> usize {
        self.sender.send(event.clone()).unwrap_or(0)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

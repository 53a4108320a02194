//! Change notifications for the staff dashboard.
//!
//! Staff-facing writes publish an event here; the SSE endpoint in
//! [`crate::routes::events`] fans them out so open dashboards refresh
//! without polling.

use serde::Serialize;
use tokio::sync::broadcast;

/// Channel capacity. Slow subscribers that fall this far behind miss
/// events and should reload.
const CHANNEL_CAPACITY: usize = 64;

/// Which part of the store changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTopic {
    Products,
    Users,
    Requests,
    Tasks,
    Auctions,
}

/// A change event pushed to dashboard subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    pub topic: ChangeTopic,
    /// Short human-readable description of what happened.
    pub detail: String,
}

/// Handle for publishing and subscribing to change events.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish a change. Nobody listening is not an error.
    pub fn publish(&self, topic: ChangeTopic, detail: impl Into<String>) {
        let event = ChangeEvent {
            topic,
            detail: detail.into(),
        };
        let _ = self.sender.send(event);
    }

    /// Subscribe to future change events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();

        feed.publish(ChangeTopic::Products, "product added");

        let event = rx.recv().await.unwrap();
        assert_eq!(event.topic, ChangeTopic::Products);
        assert_eq!(event.detail, "product added");
    }

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let feed = ChangeFeed::new();
        feed.publish(ChangeTopic::Tasks, "task approved");
    }
}

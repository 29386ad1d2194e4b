//! In-process topic registry: one broadcast channel per topic.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::trace;

use super::Notifier;
use crate::errors::domain::DomainError;

const TOPIC_CAPACITY: usize = 64;

/// Topic-keyed subscriber registry owned by the notifier.
#[derive(Default)]
pub struct TopicRegistry {
    topics: DashMap<String, broadcast::Sender<Value>>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self {
            topics: DashMap::new(),
        }
    }

    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<Value> {
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .get(topic)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl Notifier for TopicRegistry {
    async fn publish(&self, topic: &str, payload: Value) -> Result<(), DomainError> {
        let delivered = match self.topics.get(topic) {
            Some(sender) => sender.send(payload).unwrap_or(0),
            None => 0,
        };
        if delivered == 0 {
            // Drop topics whose subscribers have all gone away
            self.topics
                .remove_if(topic, |_, sender| sender.receiver_count() == 0);
        }
        trace!(topic, delivered, "Published event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn delivers_only_to_exact_topic() {
        let registry = TopicRegistry::new();
        let mut lobby = registry.subscribe("searching");
        let mut other = registry.subscribe("game:1");

        registry
            .publish("searching", json!({"status": "created"}))
            .await
            .unwrap();

        assert_eq!(lobby.recv().await.unwrap()["status"], "created");
        assert!(other.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let registry = TopicRegistry::new();
        registry.publish("nobody", json!({})).await.unwrap();

        let rx = registry.subscribe("gone");
        drop(rx);
        registry.publish("gone", json!({})).await.unwrap();
        assert_eq!(registry.subscriber_count("gone"), 0);
    }
}

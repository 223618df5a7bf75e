use std::sync::Arc;

use async_trait::async_trait;
use event_store::EventEnvelope;
use tokio::sync::RwLock;

use crate::{EventPublisher, PublishError, Result};

/// One captured outbound message.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub topic: String,
    pub key: String,
    pub envelope: EventEnvelope,
}

/// In-memory publisher used by tests.
///
/// Captures every message and can be switched into a failing mode to exercise
/// the fire-and-forget path.
#[derive(Clone, Default)]
pub struct InMemoryPublisher {
    messages: Arc<RwLock<Vec<PublishedMessage>>>,
    failing: Arc<RwLock<bool>>,
}

impl InMemoryPublisher {
    /// Creates a publisher that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent publishes fail (or succeed again).
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    /// All captured messages, in publish order.
    pub async fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.read().await.clone()
    }

    /// Captured messages for one topic.
    pub async fn messages_for(&self, topic: &str) -> Vec<PublishedMessage> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.topic == topic)
            .cloned()
            .collect()
    }

    /// Number of captured messages.
    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[async_trait]
impl EventPublisher for InMemoryPublisher {
    async fn publish(&self, topic: &str, key: &str, envelope: &EventEnvelope) -> Result<()> {
        if *self.failing.read().await {
            return Err(PublishError::Unreachable {
                topic: topic.to_string(),
                reason: "publisher switched to failing mode".to_string(),
            });
        }

        self.messages.write().await.push(PublishedMessage {
            topic: topic.to_string(),
            key: key.to_string(),
            envelope: envelope.clone(),
        });
        Ok(())
    }
}

//! Outbound forwarding of committed facts.
//!
//! A fact is published after it has been durably appended; delivery is
//! at-least-once and fire-and-forget. A failed publish is reported to the
//! caller so it can be logged and counted, but it never rolls back the
//! already-durable append. A crash between append and publish can therefore
//! drop a message; that gap is an accepted property of this core.

pub mod error;
pub mod memory;

use async_trait::async_trait;
use event_store::EventEnvelope;

pub use error::{PublishError, Result};
pub use memory::InMemoryPublisher;

/// Outbound channel for committed facts.
///
/// `topic` identifies the destination per record kind; `key` is the record
/// identifier in string form and doubles as the partition/ordering key, so
/// facts of one record are delivered in order.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, topic: &str, key: &str, envelope: &EventEnvelope) -> Result<()>;
}

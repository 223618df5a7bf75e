use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{AggregateId, AggregateKind, EventEnvelope, EventStoreError, Result, Version};

/// Append-only store of per-record event streams.
///
/// Each record kind owns an independent collection of streams keyed by the
/// record identifier; lookup is exclusively by that key. Appends to the same
/// stream are serialized through the expected-version check; streams never
/// block each other. There are no cross-stream transactions: consistency
/// between records is the command handler's concern.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends `events` to the stream for `(kind, id)`.
    ///
    /// All envelopes are written atomically as a single per-stream write.
    /// Fails with `ConcurrencyConflict` when `expected` does not match the
    /// stream's current version. Envelopes must carry consecutive sequences
    /// starting at `expected + 1`.
    ///
    /// Returns the stream's new version.
    async fn append(
        &self,
        kind: AggregateKind,
        id: AggregateId,
        expected: Version,
        events: Vec<EventEnvelope>,
    ) -> Result<Version>;

    /// Full history of the stream, in sequence order. Empty when the stream
    /// does not exist.
    async fn read(&self, kind: AggregateKind, id: AggregateId) -> Result<Vec<EventEnvelope>>;

    /// Prefix of the stream with `occurred_at <= at`, in sequence order.
    /// Supports historical reconstruction for audit queries.
    async fn read_as_of(
        &self,
        kind: AggregateKind,
        id: AggregateId,
        at: DateTime<Utc>,
    ) -> Result<Vec<EventEnvelope>>;

    /// Current version of the stream, or `None` when no events are stored.
    async fn version(&self, kind: AggregateKind, id: AggregateId) -> Result<Option<Version>>;
}

/// Validates an append batch before it is written.
///
/// A batch must be non-empty, belong entirely to the target stream, and carry
/// consecutive sequences starting right after the expected version.
pub fn validate_batch(
    kind: AggregateKind,
    id: AggregateId,
    expected: Version,
    events: &[EventEnvelope],
) -> Result<()> {
    if events.is_empty() {
        return Err(EventStoreError::InvalidBatch(
            "cannot append an empty batch".to_string(),
        ));
    }

    let mut sequence = expected;
    for event in events {
        if event.stream_id != id || event.kind != kind {
            return Err(EventStoreError::InvalidBatch(format!(
                "envelope for {} stream {} in a batch targeting {} stream {}",
                event.kind, event.stream_id, kind, id
            )));
        }
        sequence = sequence.next();
        if event.sequence != sequence {
            return Err(EventStoreError::InvalidBatch(format!(
                "non-consecutive sequence: expected {}, got {}",
                sequence, event.sequence
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(id: AggregateId, sequence: Version) -> EventEnvelope {
        EventEnvelope::new(
            id,
            AggregateKind::Tenant,
            "tenant.created",
            sequence,
            Utc::now(),
            "{}",
        )
    }

    #[test]
    fn empty_batch_is_rejected() {
        let result = validate_batch(
            AggregateKind::Tenant,
            AggregateId::new(),
            Version::initial(),
            &[],
        );
        assert!(matches!(result, Err(EventStoreError::InvalidBatch(_))));
    }

    #[test]
    fn foreign_stream_is_rejected() {
        let id = AggregateId::new();
        let other = AggregateId::new();
        let batch = vec![envelope(other, Version::first())];
        let result = validate_batch(AggregateKind::Tenant, id, Version::initial(), &batch);
        assert!(matches!(result, Err(EventStoreError::InvalidBatch(_))));
    }

    #[test]
    fn gap_in_sequences_is_rejected() {
        let id = AggregateId::new();
        let batch = vec![envelope(id, Version::first()), envelope(id, Version::new(3))];
        let result = validate_batch(AggregateKind::Tenant, id, Version::initial(), &batch);
        assert!(matches!(result, Err(EventStoreError::InvalidBatch(_))));
    }

    #[test]
    fn consecutive_batch_is_accepted() {
        let id = AggregateId::new();
        let batch = vec![
            envelope(id, Version::new(3)),
            envelope(id, Version::new(4)),
        ];
        assert!(validate_batch(AggregateKind::Tenant, id, Version::new(2), &batch).is_ok());
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    AggregateId, AggregateKind, EventEnvelope, EventStoreError, Result, Version,
    store::{EventStore, validate_batch},
};

#[derive(Debug, Default, Clone)]
struct Stream {
    version: Version,
    events: Vec<EventEnvelope>,
}

/// In-memory event store.
///
/// Models the document shape of the store boundary: one entry per stream,
/// holding the version counter and the ordered envelope list. Used as the
/// reference implementation and by tests; document-store adapters plug in
/// behind the same trait.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    streams: Arc<RwLock<HashMap<(AggregateKind, AggregateId), Stream>>>,
}

impl InMemoryEventStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of events across all streams.
    pub async fn event_count(&self) -> usize {
        self.streams
            .read()
            .await
            .values()
            .map(|s| s.events.len())
            .sum()
    }

    /// Number of streams of a given kind.
    pub async fn stream_count(&self, kind: AggregateKind) -> usize {
        self.streams
            .read()
            .await
            .keys()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    /// Drops all streams.
    pub async fn clear(&self) {
        self.streams.write().await.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(
        &self,
        kind: AggregateKind,
        id: AggregateId,
        expected: Version,
        events: Vec<EventEnvelope>,
    ) -> Result<Version> {
        validate_batch(kind, id, expected, &events)?;

        let mut streams = self.streams.write().await;
        let actual = streams
            .get(&(kind, id))
            .map(|s| s.version)
            .unwrap_or(Version::initial());
        if actual != expected {
            return Err(EventStoreError::ConcurrencyConflict {
                kind,
                stream_id: id,
                expected,
                actual,
            });
        }
        let stream = streams.entry((kind, id)).or_default();

        let appended = events.len() as u64;
        stream.events.extend(events);
        stream.version = stream
            .events
            .last()
            .map(|e| e.sequence)
            .unwrap_or(Version::initial());

        metrics::counter!("event_store_events_appended_total").increment(appended);
        tracing::debug!(%kind, stream = %id, version = %stream.version, "appended events");

        Ok(stream.version)
    }

    async fn read(&self, kind: AggregateKind, id: AggregateId) -> Result<Vec<EventEnvelope>> {
        let streams = self.streams.read().await;
        Ok(streams
            .get(&(kind, id))
            .map(|s| s.events.clone())
            .unwrap_or_default())
    }

    async fn read_as_of(
        &self,
        kind: AggregateKind,
        id: AggregateId,
        at: DateTime<Utc>,
    ) -> Result<Vec<EventEnvelope>> {
        let streams = self.streams.read().await;
        Ok(streams
            .get(&(kind, id))
            .map(|s| {
                s.events
                    .iter()
                    .filter(|e| e.occurred_at <= at)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn version(&self, kind: AggregateKind, id: AggregateId) -> Result<Option<Version>> {
        let streams = self.streams.read().await;
        Ok(streams.get(&(kind, id)).map(|s| s.version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn envelope(id: AggregateId, sequence: Version) -> EventEnvelope {
        EventEnvelope::new(
            id,
            AggregateKind::Tenant,
            "tenant.created",
            sequence,
            Utc::now(),
            r#"{"test":true}"#,
        )
    }

    fn envelope_at(id: AggregateId, sequence: Version, at: DateTime<Utc>) -> EventEnvelope {
        EventEnvelope::new(id, AggregateKind::Tenant, "tenant.created", sequence, at, "{}")
    }

    #[tokio::test]
    async fn append_single_event() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        let version = store
            .append(
                AggregateKind::Tenant,
                id,
                Version::initial(),
                vec![envelope(id, Version::first())],
            )
            .await
            .unwrap();

        assert_eq!(version, Version::first());
        let events = store.read(AggregateKind::Tenant, id).await.unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn append_batch_is_atomic_per_stream() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        let version = store
            .append(
                AggregateKind::Tenant,
                id,
                Version::initial(),
                vec![
                    envelope(id, Version::new(1)),
                    envelope(id, Version::new(2)),
                    envelope(id, Version::new(3)),
                ],
            )
            .await
            .unwrap();

        assert_eq!(version, Version::new(3));
        assert_eq!(store.event_count().await, 3);
    }

    #[tokio::test]
    async fn stale_expected_version_conflicts() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        store
            .append(
                AggregateKind::Tenant,
                id,
                Version::initial(),
                vec![envelope(id, Version::first())],
            )
            .await
            .unwrap();

        let result = store
            .append(
                AggregateKind::Tenant,
                id,
                Version::initial(),
                vec![envelope(id, Version::first())],
            )
            .await;

        assert!(matches!(
            result,
            Err(EventStoreError::ConcurrencyConflict { .. })
        ));
    }

    #[tokio::test]
    async fn only_one_of_two_same_base_appends_wins() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        store
            .append(
                AggregateKind::Tenant,
                id,
                Version::initial(),
                vec![envelope(id, Version::first())],
            )
            .await
            .unwrap();

        let a = store.clone();
        let b = store.clone();
        let first = tokio::spawn(async move {
            a.append(
                AggregateKind::Tenant,
                id,
                Version::first(),
                vec![envelope(id, Version::new(2))],
            )
            .await
        });
        let second = tokio::spawn(async move {
            b.append(
                AggregateKind::Tenant,
                id,
                Version::first(),
                vec![envelope(id, Version::new(2))],
            )
            .await
        });

        let results = [first.await.unwrap(), second.await.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(EventStoreError::ConcurrencyConflict { .. })))
            .count();
        assert_eq!(wins, 1);
        assert_eq!(conflicts, 1);
    }

    #[tokio::test]
    async fn streams_are_independent_per_kind() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        store
            .append(
                AggregateKind::Tenant,
                id,
                Version::initial(),
                vec![envelope(id, Version::first())],
            )
            .await
            .unwrap();

        // Same id under another kind is a separate stream.
        let version = store.version(AggregateKind::User, id).await.unwrap();
        assert!(version.is_none());
        assert_eq!(store.stream_count(AggregateKind::Tenant).await, 1);
    }

    #[tokio::test]
    async fn read_as_of_returns_prefix() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();
        let base = Utc::now();

        store
            .append(
                AggregateKind::Tenant,
                id,
                Version::initial(),
                vec![
                    envelope_at(id, Version::new(1), base),
                    envelope_at(id, Version::new(2), base + Duration::seconds(10)),
                    envelope_at(id, Version::new(3), base + Duration::seconds(20)),
                ],
            )
            .await
            .unwrap();

        let prefix = store
            .read_as_of(AggregateKind::Tenant, id, base + Duration::seconds(10))
            .await
            .unwrap();
        assert_eq!(prefix.len(), 2);
        assert_eq!(prefix[1].sequence, Version::new(2));
    }

    #[tokio::test]
    async fn version_of_missing_stream_is_none() {
        let store = InMemoryEventStore::new();
        let version = store
            .version(AggregateKind::Tenant, AggregateId::new())
            .await
            .unwrap();
        assert!(version.is_none());
    }
}

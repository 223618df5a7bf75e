//! Generic event-sourced repository.
//!
//! Drives the command flow shared by every record type: fold the stored
//! stream into state, let the caller mutate, append the uncommitted facts
//! with an optimistic version check, forward them best-effort, then clear
//! the buffer.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use common::AggregateId;
use event_store::{EventEnvelope, EventStore};
use publisher::EventPublisher;

use crate::aggregate::Aggregate;
use crate::codec;
use crate::error::DomainError;

/// Repository over one record type.
///
/// Cheap to construct per record type; implementations of the store and
/// publisher are shared by cloning their handles.
pub struct EventSourcedRepository<S, P, A>
where
    S: EventStore,
    P: EventPublisher,
    A: Aggregate,
{
    store: S,
    publisher: P,
    _phantom: PhantomData<A>,
}

impl<S, P, A> EventSourcedRepository<S, P, A>
where
    S: EventStore,
    P: EventPublisher,
    A: Aggregate,
{
    pub fn new(store: S, publisher: P) -> Self {
        Self {
            store,
            publisher,
            _phantom: PhantomData,
        }
    }

    /// Loads a record by folding its full stream. `None` when no events are
    /// stored.
    pub async fn find(&self, id: AggregateId) -> Result<Option<A>, DomainError> {
        let envelopes = self.store.read(A::kind(), id).await?;
        self.fold_envelopes(envelopes)
    }

    /// Loads a record, failing with `NotFound` when its stream is empty.
    pub async fn get(&self, id: AggregateId) -> Result<A, DomainError> {
        self.find(id).await?.ok_or(DomainError::NotFound {
            kind: A::kind(),
            id,
        })
    }

    /// Reconstructs the record as of a past instant by folding only the
    /// stream prefix with `occurred_at <= at`.
    pub async fn get_at(&self, id: AggregateId, at: DateTime<Utc>) -> Result<A, DomainError> {
        let envelopes = self.store.read_as_of(A::kind(), id, at).await?;
        self.fold_envelopes(envelopes)?
            .ok_or(DomainError::NotFound {
                kind: A::kind(),
                id,
            })
    }

    /// Persists the record's uncommitted facts and forwards them.
    ///
    /// The append is atomic per stream and guarded by the version the record
    /// was loaded at; a concurrent writer to the same stream makes this fail
    /// with a retryable conflict. Forwarding happens only after the append is
    /// durable and never fails the command: a dropped message is a publisher
    /// gap, not a lost fact.
    pub async fn save(&self, mut aggregate: A) -> Result<A, DomainError> {
        if aggregate.uncommitted().is_empty() {
            return Ok(aggregate);
        }
        let id = aggregate.id().ok_or(DomainError::NotYetCreated)?;

        let expected = aggregate.version();
        let mut envelopes = Vec::with_capacity(aggregate.uncommitted().len());
        let mut sequence = expected;
        for event in aggregate.uncommitted() {
            sequence = sequence.next();
            envelopes.push(codec::encode::<A>(id, sequence, event)?);
        }

        let new_version = self
            .store
            .append(A::kind(), id, expected, envelopes.clone())
            .await?;
        metrics::counter!("domain_facts_committed_total").increment(envelopes.len() as u64);

        for envelope in &envelopes {
            self.forward(id, envelope).await;
        }

        aggregate.clear_uncommitted();
        aggregate.set_version(new_version);
        Ok(aggregate)
    }

    async fn forward(&self, id: AggregateId, envelope: &EventEnvelope) {
        let topic = A::kind().topic();
        let key = id.to_string();
        if let Err(error) = self.publisher.publish(topic, &key, envelope).await {
            metrics::counter!("domain_publish_failures_total").increment(1);
            tracing::warn!(
                %error,
                topic,
                stream = %id,
                event_type = %envelope.event_type,
                "failed to forward committed fact"
            );
        }
    }

    fn fold_envelopes(&self, envelopes: Vec<EventEnvelope>) -> Result<Option<A>, DomainError> {
        if envelopes.is_empty() {
            return Ok(None);
        }
        let mut state = A::default();
        for envelope in &envelopes {
            let event = codec::decode::<A>(envelope)?;
            state.apply(&event);
            state.set_version(envelope.sequence);
        }
        Ok(Some(state))
    }
}

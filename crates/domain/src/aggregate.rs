//! Aggregate and domain event traits plus the fold mechanism.

use chrono::{DateTime, Utc};
use common::{AggregateId, AggregateKind};
use event_store::Version;
use serde::{Serialize, de::DeserializeOwned};

/// An immutable fact that happened to one record.
///
/// Facts are named in past tense, carry their occurrence timestamp, and are
/// never mutated or deleted once committed. Each record type models its facts
/// as a closed enum, so an unhandled fact kind is a compile error rather than
/// a missed `apply` branch.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// The closed discriminator tag naming the fact kind, e.g.
    /// `"tenant.created"`.
    fn event_type(&self) -> &'static str;

    /// When the fact occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// An event-sourced record.
///
/// `Default` is the empty fold seed: no identity, no fields, version 0. A
/// record is *created* by its creation fact (which assigns identity exactly
/// once) and changed only by folding further facts. Mutation operations live
/// on the concrete types; each returns a new value carrying exactly one new
/// fact in its uncommitted buffer, leaving the receiver untouched.
pub trait Aggregate: Default + Clone + Send + Sync + Sized {
    /// The facts this record type produces and consumes.
    type Event: DomainEvent;

    /// The record kind, used for stream collections and routing.
    fn kind() -> AggregateKind;

    /// The record's identity; `None` until the creation fact is applied.
    fn id(&self) -> Option<AggregateId>;

    /// Sequence of the last stored fact folded into this value.
    fn version(&self) -> Version;

    /// Set by the repository after loading or persisting.
    fn set_version(&mut self, version: Version);

    /// Applies one fact. Pure and total: same state plus same fact always
    /// yields the same new state, with no side effects and no failure.
    fn apply(&mut self, event: &Self::Event);

    /// Facts produced by mutations and not yet durably appended.
    fn uncommitted(&self) -> &[Self::Event];

    /// Clears the buffer. Called by the repository once the facts are
    /// durable (and forwarded best-effort).
    fn clear_uncommitted(&mut self);

    /// Folds facts into state starting from the empty seed.
    ///
    /// Deterministic for any prefix of a stream; the repository feeds events
    /// in sequence order.
    fn fold(events: impl IntoIterator<Item = Self::Event>) -> Self {
        let mut state = Self::default();
        for event in events {
            state.apply(&event);
        }
        state
    }
}

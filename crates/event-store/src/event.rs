use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AggregateId, AggregateKind};

/// Per-stream sequence counter, used both as the stream's version for
/// optimistic concurrency and as the total fold order.
///
/// Sequences start at 1 for the first fact of a stream and increase by 1 per
/// appended fact. Folding by sequence, not by wall-clock timestamp, keeps
/// replay order total even when two facts share an `occurred_at`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Creates a version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Version of a stream with no facts yet.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Sequence of the first fact in a stream.
    pub fn first() -> Self {
        Self(1)
    }

    /// The next sequence.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Version> for i64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// Wire form of one committed fact.
///
/// The payload is kept as an opaque serialized `body`; the envelope carries
/// the discriminator tag, the occurrence timestamp and the position of the
/// fact within its stream. Envelopes are never edited or removed once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Identifier of the stream (= record) this fact belongs to.
    pub stream_id: AggregateId,

    /// Record kind owning the stream.
    pub kind: AggregateKind,

    /// Closed discriminator tag naming the fact kind (e.g. "tenant.created").
    pub event_type: String,

    /// Position of this fact within its stream.
    pub sequence: Version,

    /// When the fact occurred. Informational; drives point-in-time reads only.
    pub occurred_at: DateTime<Utc>,

    /// Serialized payload.
    pub body: String,
}

impl EventEnvelope {
    /// Creates an envelope.
    pub fn new(
        stream_id: AggregateId,
        kind: AggregateKind,
        event_type: impl Into<String>,
        sequence: Version,
        occurred_at: DateTime<Utc>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            stream_id,
            kind,
            event_type: event_type.into(),
            sequence,
            occurred_at,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_ordering() {
        let v1 = Version::new(1);
        let v2 = Version::new(2);
        assert!(v1 < v2);
        assert_eq!(v1.next(), v2);
    }

    #[test]
    fn version_initial_and_first() {
        assert_eq!(Version::initial().as_i64(), 0);
        assert_eq!(Version::first().as_i64(), 1);
        assert_eq!(Version::initial().next(), Version::first());
    }

    #[test]
    fn envelope_serialization_roundtrip() {
        let envelope = EventEnvelope::new(
            AggregateId::new(),
            AggregateKind::Tenant,
            "tenant.created",
            Version::first(),
            Utc::now(),
            r#"{"type":"tenant.created"}"#,
        );
        let json = serde_json::to_string(&envelope).unwrap();
        let back: EventEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope, back);
    }
}

use thiserror::Error;

use crate::{AggregateId, AggregateKind, Version};

/// Errors raised by event store implementations.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// The stream's version at append time no longer matches the version the
    /// caller loaded. The caller must reload the record and retry the whole
    /// command.
    #[error(
        "concurrency conflict on {kind} stream {stream_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        kind: AggregateKind,
        stream_id: AggregateId,
        expected: Version,
        actual: Version,
    },

    /// The stream has no events.
    #[error("no events stored for {kind} stream {stream_id}")]
    StreamNotFound {
        kind: AggregateKind,
        stream_id: AggregateId,
    },

    /// A batch handed to `append` was malformed (empty, mixed streams, or
    /// non-consecutive sequences).
    #[error("invalid append batch: {0}")]
    InvalidBatch(String),

    /// A stored envelope could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;

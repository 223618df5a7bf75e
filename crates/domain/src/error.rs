//! Domain error taxonomy.

use common::{AggregateId, AggregateKind};
use event_store::EventStoreError;
use thiserror::Error;

/// A malformed scalar rejected by a value object's parse constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors surfaced to command callers.
///
/// Validation, invariant, not-found and serialization failures are terminal
/// for the command; a concurrency conflict (inside `Store`) is retryable by
/// reloading the record and re-running the command. Publish failures never
/// appear here: they are logged and counted in the repository.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed command parameter, rejected before any state is touched.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Business rule broken; state unchanged, no fact produced.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// Mutation attempted on a record whose creation fact does not exist yet.
    #[error("record has not been created yet")]
    NotYetCreated,

    /// No stored events for the requested record.
    #[error("{kind} {id} not found")]
    NotFound {
        kind: AggregateKind,
        id: AggregateId,
    },

    /// Store failure, including optimistic-concurrency conflicts.
    #[error("event store error: {0}")]
    Store(#[from] EventStoreError),

    /// A stored envelope could not be decoded. Fatal for the record's
    /// reconstruction; a skipped fact would corrupt every later fold.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    /// A mutation that would leave every observable field unchanged.
    pub fn no_change(field: &str) -> Self {
        DomainError::Invariant(format!("new {field} must differ from current {field}"))
    }

    /// Returns true when retrying the whole command may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Store(EventStoreError::ConcurrencyConflict { .. })
        )
    }
}

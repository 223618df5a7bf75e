//! Append-only per-record event streams.
//!
//! Each record owns one stream, keyed by `(kind, id)`. Appends are atomic per
//! stream and guarded by an expected-version check; reads return envelopes in
//! sequence order, optionally truncated to a past instant.

pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use common::{AggregateId, AggregateKind};
pub use error::{EventStoreError, Result};
pub use event::{EventEnvelope, Version};
pub use memory::InMemoryEventStore;
pub use store::EventStore;

//! Event-sourced core for the four tenancy record types.
//!
//! Durable state is never stored directly. Every state change is an immutable
//! fact appended to the record's stream; current state is the fold of that
//! stream from an empty seed. This crate provides:
//! - `Aggregate`/`DomainEvent` traits with the fold mechanism
//! - one state machine per record type (tenant, user, profile, membership)
//! - the event codec between facts and wire envelopes
//! - the generic repository driving load, mutate, append and publish

pub mod aggregate;
pub mod codec;
pub mod error;
pub mod membership;
pub mod profile;
pub mod repository;
pub mod tenant;
pub mod user;

pub use aggregate::{Aggregate, DomainEvent};
pub use common::{AggregateId, AggregateKind};
pub use error::{DomainError, ValidationError};
pub use repository::EventSourcedRepository;

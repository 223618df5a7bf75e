//! Command handlers for the membership record.
//!
//! Admission crosses record boundaries: it reads the tenant and the user
//! streams and asks a counting port how many members the tenant already has.
//! The count lives outside the streams (a projection or index owns it), so
//! it is injected rather than derived here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::AggregateId;
use event_store::EventStore;
use publisher::EventPublisher;

use crate::error::DomainError;
use crate::repository::EventSourcedRepository;
use crate::tenant::Tenant;
use crate::user::User;

use super::aggregate::Membership;
use super::value_objects::MemberRole;

/// Number of active members a tenant currently holds.
#[async_trait]
pub trait MemberCount: Send + Sync {
    async fn active_members(&self, tenant_id: AggregateId) -> Result<usize, DomainError>;
}

/// Command to admit a user into a tenant. `role` is a wire role name.
#[derive(Debug, Clone)]
pub struct AddMember {
    pub tenant_id: AggregateId,
    pub user_id: AggregateId,
    pub role: String,
}

/// Membership command handler.
pub struct MembershipService<S, P, C>
where
    S: EventStore + Clone,
    P: EventPublisher + Clone,
    C: MemberCount,
{
    memberships: EventSourcedRepository<S, P, Membership>,
    tenants: EventSourcedRepository<S, P, Tenant>,
    users: EventSourcedRepository<S, P, User>,
    counter: C,
}

impl<S, P, C> MembershipService<S, P, C>
where
    S: EventStore + Clone,
    P: EventPublisher + Clone,
    C: MemberCount,
{
    pub fn new(store: S, publisher: P, counter: C) -> Self {
        Self {
            memberships: EventSourcedRepository::new(store.clone(), publisher.clone()),
            tenants: EventSourcedRepository::new(store.clone(), publisher.clone()),
            users: EventSourcedRepository::new(store, publisher),
            counter,
        }
    }

    #[tracing::instrument(skip_all, fields(tenant = %command.tenant_id, user = %command.user_id))]
    pub async fn add(&self, command: AddMember) -> Result<Membership, DomainError> {
        let role = MemberRole::parse(&command.role)?;
        let tenant = self.tenants.get(command.tenant_id).await?;
        if !tenant.is_active() {
            return Err(DomainError::Invariant(
                "members cannot be added to an inactive tenant".to_string(),
            ));
        }
        let user = self.users.get(command.user_id).await?;
        if !user.is_active() {
            return Err(DomainError::Invariant(
                "a deactivated user cannot join a tenant".to_string(),
            ));
        }

        let active_members = self.counter.active_members(command.tenant_id).await?;
        let membership = Membership::add(&tenant, command.user_id, role, active_members)?;
        self.memberships.save(membership).await
    }

    #[tracing::instrument(skip_all, fields(membership = %id))]
    pub async fn change_role(
        &self,
        id: AggregateId,
        role: &str,
    ) -> Result<Membership, DomainError> {
        let role = MemberRole::parse(role)?;
        let membership = self.memberships.get(id).await?;
        self.memberships.save(membership.change_role(role)?).await
    }

    #[tracing::instrument(skip_all, fields(membership = %id))]
    pub async fn deactivate(&self, id: AggregateId) -> Result<Membership, DomainError> {
        let membership = self.memberships.get(id).await?;
        self.memberships.save(membership.deactivate()?).await
    }

    pub async fn get(&self, id: AggregateId) -> Result<Membership, DomainError> {
        self.memberships.get(id).await
    }

    /// The membership as it was at a past instant.
    pub async fn get_at(
        &self,
        id: AggregateId,
        at: DateTime<Utc>,
    ) -> Result<Membership, DomainError> {
        self.memberships.get_at(id, at).await
    }
}

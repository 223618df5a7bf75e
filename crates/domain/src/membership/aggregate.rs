//! Membership state machine.

use chrono::{DateTime, Utc};
use common::{AggregateId, AggregateKind};
use event_store::Version;

use crate::aggregate::Aggregate;
use crate::error::DomainError;
use crate::tenant::Tenant;

use super::events::MembershipEvent;
use super::value_objects::MemberRole;

/// One user's membership in one tenant.
///
/// Admission rules depend on the owning tenant, so `add` takes the tenant
/// state and the current active-member count. Deactivation is terminal.
#[derive(Debug, Clone, Default)]
pub struct Membership {
    id: Option<AggregateId>,
    version: Version,
    tenant_id: Option<AggregateId>,
    user_id: Option<AggregateId>,
    role: Option<MemberRole>,
    active: bool,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    pending: Vec<MembershipEvent>,
}

impl Membership {
    /// Admits a user into a tenant.
    ///
    /// A personal tenant holds at most one member, always as admin; any
    /// requested role is overridden. Organization tenants admit members up
    /// to the subscription plan's cap.
    pub fn add(
        tenant: &Tenant,
        user_id: AggregateId,
        role: MemberRole,
        active_members: usize,
    ) -> Result<Self, DomainError> {
        let tenant_id = tenant.id().ok_or(DomainError::NotYetCreated)?;
        if tenant.is_person() && active_members > 0 {
            return Err(DomainError::Invariant(
                "a personal tenant cannot hold more than one member".to_string(),
            ));
        }
        if active_members >= tenant.plan().max_members() {
            return Err(DomainError::Invariant(format!(
                "tenant has reached the {} member limit of its {} plan",
                tenant.plan().max_members(),
                tenant.plan()
            )));
        }
        let role = if tenant.is_person() {
            MemberRole::Admin
        } else {
            role
        };
        let event = MembershipEvent::added(tenant_id, user_id, role);
        Ok(Self::default().record(event))
    }

    pub fn change_role(&self, role: MemberRole) -> Result<Self, DomainError> {
        self.ensure_created()?;
        if self.role == Some(role) {
            return Err(DomainError::no_change("role"));
        }
        Ok(self.record(MembershipEvent::role_changed(role)))
    }

    pub fn deactivate(&self) -> Result<Self, DomainError> {
        self.ensure_created()?;
        if !self.active {
            return Err(DomainError::Invariant(
                "membership is already inactive".to_string(),
            ));
        }
        Ok(self.record(MembershipEvent::deactivated()))
    }

    pub fn tenant_id(&self) -> Option<AggregateId> {
        self.tenant_id
    }

    pub fn user_id(&self) -> Option<AggregateId> {
        self.user_id
    }

    pub fn role(&self) -> Option<MemberRole> {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn ensure_created(&self) -> Result<(), DomainError> {
        if self.id.is_none() {
            return Err(DomainError::NotYetCreated);
        }
        Ok(())
    }

    fn record(&self, event: MembershipEvent) -> Self {
        let mut next = self.clone();
        next.apply(&event);
        next.pending.push(event);
        next
    }
}

impl Aggregate for Membership {
    type Event = MembershipEvent;

    fn kind() -> AggregateKind {
        AggregateKind::TenantUser
    }

    fn id(&self) -> Option<AggregateId> {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: &MembershipEvent) {
        match event {
            MembershipEvent::Added {
                id,
                tenant_id,
                user_id,
                role,
                occurred_at,
            } => {
                self.id = Some(*id);
                self.tenant_id = Some(*tenant_id);
                self.user_id = Some(*user_id);
                self.role = Some(*role);
                self.active = true;
                self.created_at = Some(*occurred_at);
                self.updated_at = Some(*occurred_at);
            }
            MembershipEvent::RoleChanged { role, occurred_at } => {
                self.role = Some(*role);
                self.updated_at = Some(*occurred_at);
            }
            MembershipEvent::Deactivated { occurred_at } => {
                self.active = false;
                self.updated_at = Some(*occurred_at);
            }
        }
    }

    fn uncommitted(&self) -> &[MembershipEvent] {
        &self.pending
    }

    fn clear_uncommitted(&mut self) {
        self.pending.clear();
    }
}
